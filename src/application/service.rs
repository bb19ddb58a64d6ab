use crate::domain::points::compute_points;
use crate::domain::ports::SharedReceiptStore;
use crate::domain::receipt::{Origin, Receipt, ReceiptRecord, RequestKind};
use crate::error::{ReceiptError, Result};
use tracing::info;
use uuid::Uuid;

/// The main entry point for receipt processing.
///
/// `ReceiptService` composes the pure rule engine with an injected storage
/// backend. It owns the origin (host/port) metadata stamped onto every
/// persisted row and holds no other state, so it is safe to share behind an
/// `Arc` across request handlers.
pub struct ReceiptService {
    store: SharedReceiptStore,
    origin: Origin,
}

impl ReceiptService {
    pub fn new(store: SharedReceiptStore, origin: Origin) -> Self {
        Self { store, origin }
    }

    /// Scores a validated receipt, persists it, and returns the new id.
    pub async fn submit(&self, receipt: Receipt) -> Result<Uuid> {
        let points = compute_points(&receipt);
        let record = ReceiptRecord::new(receipt, points, &self.origin, RequestKind::Post);
        let id = record.id;
        self.store.create(record).await?;
        info!(%id, points, "stored receipt");
        Ok(id)
    }

    /// Returns the points for a stored receipt.
    ///
    /// Every successful lookup also appends a GET-tagged copy of the row as an
    /// audit log entry. The returned points never change across lookups.
    pub async fn points(&self, id: Uuid) -> Result<i64> {
        let record = self.store.get(id).await?.ok_or(ReceiptError::NotFound)?;
        let log = record.log_read(&self.origin);
        self.store.create(log).await?;
        info!(%id, points = record.points, "served points lookup");
        Ok(record.points)
    }
}
