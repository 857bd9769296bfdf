// src/mcp/tools/time.rs
// Time entries and the services they book against

use super::{list_header, relationship, validate_date, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::{ServiceAttributes, TimeEntryAttributes};
use crate::error::ProductiveError;
use crate::mcp::ProductiveServer;

/// Minutes as "Xh YYm"
fn format_minutes(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

pub async fn list_time_entries(
    server: &ProductiveServer,
    person_id: Option<String>,
    after: Option<String>,
    before: Option<String>,
    limit: Option<u32>,
) -> Result<String, String> {
    let mut query = Query::new()
        .sort("-date")
        .page_size(limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE));
    if let Some(id) = person_id {
        query = query.filter("person_id", id);
    }
    if let Some(date) = after {
        validate_date(&date)?;
        query = query.filter("after", date);
    }
    if let Some(date) = before {
        validate_date(&date)?;
        query = query.filter("before", date);
    }

    let doc = server
        .client
        .list::<TimeEntryAttributes>("time_entries", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok("No time entries found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "time entries");
    let mut total_minutes: i64 = 0;
    for entry in &doc.data {
        let minutes = entry.attributes.time.unwrap_or(0);
        total_minutes += minutes;
        output.push_str(&format!(
            "  [{}] {}: {} - {}\n",
            entry.id,
            entry.attributes.date.as_deref().unwrap_or("no date"),
            format_minutes(minutes),
            entry.attributes.note.as_deref().unwrap_or("(no note)")
        ));
    }
    output.push_str(&format!("Listed total: {}\n", format_minutes(total_minutes)));
    Ok(output)
}

pub async fn create_time_entry(
    server: &ProductiveServer,
    person_id: String,
    service_id: String,
    date: String,
    minutes: i64,
    note: Option<String>,
) -> Result<String, String> {
    if minutes <= 0 {
        return Err(ProductiveError::InvalidInput("minutes must be positive".to_string()).into());
    }
    validate_date(&date)?;

    let mut attributes = serde_json::Map::new();
    attributes.insert("date".to_string(), serde_json::json!(date));
    attributes.insert("time".to_string(), serde_json::json!(minutes));
    if let Some(text) = note {
        attributes.insert("note".to_string(), serde_json::json!(text));
    }
    let body = serde_json::json!({
        "data": {
            "type": "time_entries",
            "attributes": attributes,
            "relationships": {
                "person": relationship("people", &person_id),
                "service": relationship("services", &service_id),
            }
        }
    });
    let doc = server
        .client
        .create::<TimeEntryAttributes>("time_entries", body)
        .await?;
    Ok(format!(
        "Logged {} on {} (id: {})",
        format_minutes(minutes),
        date,
        doc.data.id
    ))
}

pub async fn list_services(
    server: &ProductiveServer,
    name: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().page_size(DEFAULT_PAGE_SIZE);
    if let Some(name) = name {
        query = query.filter("name", name);
    }
    let doc = server
        .client
        .list::<ServiceAttributes>("services", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok("No services found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "services");
    for service in &doc.data {
        output.push_str(&format!("  [{}] {}\n", service.id, service.attributes.name));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0h 00m");
        assert_eq!(format_minutes(45), "0h 45m");
        assert_eq!(format_minutes(60), "1h 00m");
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(495), "8h 15m");
    }
}
