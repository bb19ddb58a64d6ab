use super::receipt::Receipt;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

const QUARTER: Decimal = dec!(0.25);
const FIFTH: Decimal = dec!(0.2);

/// Computes the loyalty points for a receipt.
///
/// Pure and total: a structurally valid receipt always yields a score, and
/// equal inputs always yield equal outputs. Seven independent rules, summed:
///
/// 1. One point per alphanumeric character in the retailer name.
/// 2. 50 points if the total is a round dollar amount.
/// 3. 25 points if the total is a multiple of 0.25.
/// 4. 5 points for every two items.
/// 5. `ceil(price * 0.2)` per item whose trimmed description length is a
///    positive multiple of 3.
/// 6. 6 points if the day of the purchase date is odd.
/// 7. 10 points if the purchase time is strictly between 14:00 and 16:00.
///
/// Monetary rules use `Decimal` arithmetic throughout, so 0.25-multiple and
/// round-dollar checks are exact at every precision boundary.
pub fn compute_points(receipt: &Receipt) -> i64 {
    let mut points: i64 = 0;

    points += receipt
        .retailer
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as i64;

    if receipt.total.fract().is_zero() {
        points += 50;
    }

    if (receipt.total % QUARTER).is_zero() {
        points += 25;
    }

    points += (receipt.items.len() as i64 / 2) * 5;

    for item in &receipt.items {
        let trimmed = item.short_description.trim();
        let len = trimmed.chars().count();
        // An empty description earns nothing, even though 0 % 3 == 0.
        if len > 0 && len % 3 == 0 {
            points += (item.price * FIFTH).ceil().to_i64().unwrap_or(0);
        }
    }

    if let Some(day) = parse_day_of_month(&receipt.purchase_date)
        && day % 2 == 1
    {
        points += 6;
    }

    if let Some((hour, minute)) = parse_clock(&receipt.purchase_time) {
        // Strictly after 14:00 and strictly before 16:00.
        if (hour == 14 && minute > 0) || hour == 15 {
            points += 10;
        }
    }

    points
}

/// Day-of-month as the digits after the last `-`. No calendar validation
/// beyond the parse.
pub(crate) fn parse_day_of_month(date: &str) -> Option<u32> {
    date.rsplit('-').next()?.trim().parse().ok()
}

/// "HH:MM" on a 24-hour clock.
pub(crate) fn parse_clock(time: &str) -> Option<(u32, u32)> {
    let (hour, minute) = time.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}
