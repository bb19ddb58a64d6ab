use crate::domain::receipt::{Item, Receipt};
use crate::error::{ReceiptError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw submission body. Every field is optional so that missing fields can be
/// reported by name, in a fixed order, instead of failing the whole
/// deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub total: Option<serde_json::Value>,
    pub items: Option<Vec<ItemPayload>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub short_description: Option<String>,
    pub price: Option<serde_json::Value>,
}

impl ReceiptPayload {
    /// Validates the payload into a typed `Receipt`.
    ///
    /// Presence is checked first, in the fixed order retailer, purchaseDate,
    /// purchaseTime, total, items; the first missing field short-circuits.
    /// Then values are checked: amounts must parse as decimals (JSON number
    /// or numeric string), the date must carry a numeric day-of-month, and
    /// the time must be a valid 24-hour "HH:MM".
    pub fn validate(self) -> Result<Receipt> {
        let retailer = self.retailer.ok_or(ReceiptError::MissingField("retailer"))?;
        let purchase_date = self
            .purchase_date
            .ok_or(ReceiptError::MissingField("purchaseDate"))?;
        let purchase_time = self
            .purchase_time
            .ok_or(ReceiptError::MissingField("purchaseTime"))?;
        let total = self.total.ok_or(ReceiptError::MissingField("total"))?;
        let items = self.items.ok_or(ReceiptError::MissingField("items"))?;

        let total = parse_amount(&total).ok_or(ReceiptError::InvalidField("total"))?;

        crate::domain::points::parse_day_of_month(&purchase_date)
            .ok_or(ReceiptError::InvalidField("purchaseDate"))?;
        crate::domain::points::parse_clock(&purchase_time)
            .ok_or(ReceiptError::InvalidField("purchaseTime"))?;

        let items = items
            .into_iter()
            .map(|item| {
                let short_description = item
                    .short_description
                    .ok_or(ReceiptError::InvalidField("items"))?;
                let price = item
                    .price
                    .as_ref()
                    .and_then(parse_amount)
                    .ok_or(ReceiptError::InvalidField("items"))?;
                Ok(Item {
                    short_description,
                    price,
                })
            })
            .collect::<Result<Vec<Item>>>()?;

        Ok(Receipt {
            retailer,
            purchase_date,
            purchase_time,
            total,
            items,
        })
    }
}

/// Parses a monetary amount given as either a JSON number or numeric text.
///
/// Numbers go through their exact JSON text form rather than an f64, so
/// values like 6.49 survive as the decimal a client wrote.
fn parse_amount(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}
