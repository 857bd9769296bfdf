// src/mcp/tools/pages.rs
// Project wiki pages

use super::{list_header, DEFAULT_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::PageAttributes;
use crate::mcp::ProductiveServer;
use crate::normalize::{collapse_mentions, strip_markup, truncate};

/// Display budget for a page body
const PAGE_BODY_CHARS: usize = 2000;

pub async fn list_pages(
    server: &ProductiveServer,
    project_id: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().page_size(DEFAULT_PAGE_SIZE);
    if let Some(id) = project_id {
        query = query.filter("project_id", id);
    }
    let doc = server.client.list::<PageAttributes>("pages", &query).await?;
    if doc.data.is_empty() {
        return Ok("No pages found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "pages");
    for page in &doc.data {
        output.push_str(&format!("  [{}] {}\n", page.id, page.attributes.title));
    }
    Ok(output)
}

pub async fn get_page(server: &ProductiveServer, page_id: String) -> Result<String, String> {
    let doc = server
        .client
        .fetch::<PageAttributes>(&format!("pages/{}", page_id), &Query::new())
        .await?;
    let page = &doc.data;

    let body = page
        .attributes
        .body
        .as_deref()
        .map(|raw| strip_markup(&collapse_mentions(raw)))
        .filter(|text| !text.is_empty());
    match body {
        Some(text) => Ok(format!(
            "# {}\n\n{}",
            page.attributes.title,
            truncate(&text, PAGE_BODY_CHARS)
        )),
        None => Ok(format!("# {}\n\n(empty page)", page.attributes.title)),
    }
}
