use crate::domain::ports::ReceiptStore;
use crate::domain::receipt::ReceiptRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for receipt rows.
///
/// Uses `Arc<RwLock<HashMap<Uuid, ReceiptRecord>>>` for shared concurrent
/// access. `Clone` shares the underlying map. Suitable for tests and for
/// running without a persistence backend.
#[derive(Default, Clone)]
pub struct InMemoryReceiptStore {
    records: Arc<RwLock<HashMap<Uuid, ReceiptRecord>>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, including GET log rows.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn create(&self, record: ReceiptRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ReceiptRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::{Origin, Receipt, RequestKind};
    use rust_decimal_macros::dec;

    fn sample_record() -> ReceiptRecord {
        let receipt = Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            total: dec!(35.35),
            items: vec![],
        };
        let origin = Origin {
            host: "box-1".to_string(),
            port: 5000,
        };
        ReceiptRecord::new(receipt, 28, &origin, RequestKind::Post)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryReceiptStore::new();
        let record = sample_record();
        let id = record.id;

        store.create(record.clone()).await.unwrap();

        let retrieved = store.get(id).await.unwrap();
        assert_eq!(retrieved, Some(record));
        assert_eq!(store.len().await, 1);

        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clone_shares_rows() {
        let store = InMemoryReceiptStore::new();
        let other = store.clone();

        store.create(sample_record()).await.unwrap();
        assert_eq!(other.len().await, 1);
    }
}
