// src/mcp/tools/deals.rs
// Deal and budget listing

use super::{list_header, DEFAULT_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::DealAttributes;
use crate::mcp::ProductiveServer;

pub async fn list_deals(
    server: &ProductiveServer,
    company_id: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().sort("-date").page_size(DEFAULT_PAGE_SIZE);
    if let Some(id) = company_id {
        query = query.filter("company_id", id);
    }
    let doc = server.client.list::<DealAttributes>("deals", &query).await?;
    if doc.data.is_empty() {
        return Ok("No deals found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "deals");
    for deal in &doc.data {
        let marker = match deal.attributes.deal_type_id {
            Some(2) => " [budget]",
            _ => "",
        };
        let date = deal
            .attributes
            .date
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        output.push_str(&format!(
            "  [{}] {}{}{}\n",
            deal.id, deal.attributes.name, marker, date
        ));
    }
    Ok(output)
}
