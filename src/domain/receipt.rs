use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single line item on a receipt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: Decimal,
}

/// A validated receipt as submitted by a client.
///
/// `purchase_date` and `purchase_time` stay as text: the scoring rules operate
/// on the raw "YYYY-MM-DD" / "HH:MM" forms, and the HTTP layer has already
/// checked they parse before a `Receipt` is constructed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub total: Decimal,
    pub items: Vec<Item>,
}

/// Whether a stored row came from an original submission or a points lookup.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestKind {
    Post,
    Get,
}

/// Where this process is reachable, recorded on every stored row.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Origin {
    pub host: String,
    pub port: u16,
}

/// A persisted receipt row.
///
/// Created once per submission and again, with a fresh id, for every
/// successful points lookup (an audit log row, never an update). Rows are
/// immutable after creation; there is no delete path.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    pub id: Uuid,
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub total: Decimal,
    pub items: Vec<Item>,
    pub points: i64,
    pub host: String,
    pub port: u16,
    pub request_kind: RequestKind,
    pub created_at: DateTime<Utc>,
}

impl ReceiptRecord {
    pub fn new(receipt: Receipt, points: i64, origin: &Origin, kind: RequestKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            retailer: receipt.retailer,
            purchase_date: receipt.purchase_date,
            purchase_time: receipt.purchase_time,
            total: receipt.total,
            items: receipt.items,
            points,
            host: origin.host.clone(),
            port: origin.port,
            request_kind: kind,
            created_at: Utc::now(),
        }
    }

    /// Builds the audit row appended on a successful points lookup: same
    /// business fields and points, fresh id, tagged as a GET.
    pub fn log_read(&self, origin: &Origin) -> Self {
        Self {
            id: Uuid::new_v4(),
            retailer: self.retailer.clone(),
            purchase_date: self.purchase_date.clone(),
            purchase_time: self.purchase_time.clone(),
            total: self.total,
            items: self.items.clone(),
            points: self.points,
            host: origin.host.clone(),
            port: origin.port,
            request_kind: RequestKind::Get,
            created_at: Utc::now(),
        }
    }
}
