// src/mcp/tools/companies.rs
// Company listing

use super::{list_header, DEFAULT_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::CompanyAttributes;
use crate::mcp::ProductiveServer;

pub async fn list_companies(
    server: &ProductiveServer,
    name: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().sort("name").page_size(DEFAULT_PAGE_SIZE);
    if let Some(name) = name {
        query = query.filter("name", name);
    }
    let doc = server
        .client
        .list::<CompanyAttributes>("companies", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok("No companies found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "companies");
    for company in &doc.data {
        output.push_str(&format!("  [{}] {}\n", company.id, company.attributes.name));
    }
    Ok(output)
}
