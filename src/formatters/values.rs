use chrono::NaiveDateTime;
use num_traits::ToPrimitive;

use crate::error::{Result, ViewerError};
use crate::models::Amount;

/// Timestamp layout used by the node, always UTC.
pub const NODE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn as_f64<T: ToPrimitive>(raw: &T) -> f64 {
    raw.to_f64().unwrap_or(0.0)
}

/// Log-scaled reputation: 25 for a fresh account, +9 per order of
/// magnitude above 1e9.
pub fn reputation_to_score<T: ToPrimitive>(raw: &T) -> f64 {
    let raw = as_f64(raw);
    if raw == 0.0 {
        return 25.0;
    }
    let mut score = (raw.abs().log10() - 9.0).max(0.0);
    if raw < 0.0 {
        score = -score;
    }
    score * 9.0 + 25.0
}

pub fn format_reputation<T: ToPrimitive>(raw: &T) -> String {
    format!("{:.1}", reputation_to_score(raw))
}

pub fn format_reputation_with_raw<T: ToPrimitive + std::fmt::Display>(raw: &T) -> String {
    format!("{} ({})", raw, format_reputation(raw))
}

pub fn format_percent<T: ToPrimitive>(raw_hundredths: &T) -> String {
    format!("{:.2}%", as_f64(raw_hundredths) / 100.0)
}

pub fn format_rshares<T: ToPrimitive>(raw: &T) -> String {
    format!("{:.2} bn", as_f64(raw) / 1e9)
}

pub fn format_vote_weight<W: ToPrimitive, T: ToPrimitive>(raw: &W, total: &T) -> String {
    let weight = as_f64(raw);
    let total = as_f64(total);
    let mut formatted = format!("{:.2} tn", weight / 1e12);
    if total != 0.0 {
        formatted.push_str(&format!(" ({:.2}%)", weight * 100.0 / total));
    }
    formatted
}

/// Sums amounts of one currency, e.g. the three payout fields of a post.
pub fn format_currency(amounts: &[Amount]) -> Result<String> {
    let (first, rest) = amounts
        .split_first()
        .ok_or_else(|| ViewerError::InvalidAmount("no amounts".to_string()))?;
    let total = rest
        .iter()
        .try_fold(first.clone(), |sum, amount| sum.checked_add(amount))?;
    Ok(total.to_string())
}

pub fn parse_node_time(timestamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, NODE_TIME_FORMAT)
        .map_err(|_| ViewerError::InvalidTimestamp(timestamp.to_string()))
}

/// Re-renders a node timestamp with `date_format`. Unparsable input is
/// returned unchanged.
pub fn format_date(timestamp: &str, date_format: &str) -> String {
    match parse_node_time(timestamp) {
        Ok(time) => time.format(date_format).to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn vote_action(weight: i64) -> &'static str {
    match weight {
        w if w > 0 => "upvotes",
        0 => "unvotes",
        _ => "downvotes",
    }
}
