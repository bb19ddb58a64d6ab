use crate::domain::ports::ReceiptStore;
use crate::domain::receipt::ReceiptRecord;
use crate::error::{ReceiptError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family holding receipt rows keyed by their uuid bytes.
pub const CF_RECEIPTS: &str = "receipts";

/// A persistent receipt store backed by RocksDB.
///
/// Rows are serialized as JSON under the 16 uuid key bytes. Audit log rows
/// land in the same column family under their own fresh ids.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbReceiptStore {
    db: Arc<DB>,
}

impl RocksDbReceiptStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the "receipts" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_receipts = ColumnFamilyDescriptor::new(CF_RECEIPTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_receipts])
            .map_err(|e| ReceiptError::Storage(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_RECEIPTS)
            .ok_or_else(|| ReceiptError::Storage("receipts column family not found".to_string()))
    }
}

#[async_trait]
impl ReceiptStore for RocksDbReceiptStore {
    async fn create(&self, record: ReceiptRecord) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(&record)
            .map_err(|e| ReceiptError::Storage(format!("serialization error: {}", e)))?;

        self.db
            .put_cf(cf, record.id.as_bytes(), value)
            .map_err(|e| ReceiptError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ReceiptRecord>> {
        let cf = self.cf()?;
        let result = self
            .db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| ReceiptError::Storage(e.to_string()))?;

        match result {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)
                    .map_err(|e| ReceiptError::Storage(format!("deserialization error: {}", e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
