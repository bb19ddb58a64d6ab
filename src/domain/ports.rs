use super::receipt::ReceiptRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Storage port for receipt rows. Implementations must make concurrent
/// creates and reads safe; callers never update or delete.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    async fn create(&self, record: ReceiptRecord) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<ReceiptRecord>>;
}

pub type SharedReceiptStore = Arc<dyn ReceiptStore>;
