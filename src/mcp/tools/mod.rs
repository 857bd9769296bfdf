// src/mcp/tools/mod.rs
// Tool implementations, grouped by resource family

pub mod comments;
pub mod companies;
pub mod deals;
pub mod inbox;
pub mod pages;
pub mod people;
pub mod projects;
pub mod tasks;
pub mod time;

use crate::error::ProductiveError;

/// Default page size for list tools
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 30;
/// Productive caps page[size] at 200
pub(crate) const MAX_PAGE_SIZE: u32 = 200;

/// Header line for list output, mentioning the server-side total when the
/// page does not cover it
pub(crate) fn list_header(shown: usize, total: u64, noun: &str) -> String {
    if total > shown as u64 {
        format!("{} of {} {}:\n", shown, total, noun)
    } else {
        format!("{} {}:\n", shown, noun)
    }
}

/// JSON:API to-one relationship payload
pub(crate) fn relationship(kind: &str, id: &str) -> serde_json::Value {
    serde_json::json!({ "data": { "type": kind, "id": id } })
}

/// Productive accepts dates as YYYY-MM-DD only
pub(crate) fn validate_date(date: &str) -> Result<(), String> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ProductiveError::InvalidInput(format!("date '{}' must be YYYY-MM-DD", date)).into()
        })
}
