// src/mcp/tools/people.rs
// People listing

use super::{list_header, DEFAULT_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::PersonAttributes;
use crate::mcp::ProductiveServer;

pub async fn list_people(
    server: &ProductiveServer,
    name: Option<String>,
    email: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().page_size(DEFAULT_PAGE_SIZE);
    if let Some(name) = name {
        query = query.filter("name", name);
    }
    if let Some(email) = email {
        query = query.filter("email", email);
    }
    let doc = server.client.list::<PersonAttributes>("people", &query).await?;
    if doc.data.is_empty() {
        return Ok("No people found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "people");
    for person in &doc.data {
        let name = person
            .attributes
            .display_name()
            .unwrap_or_else(|| "Unknown".to_string());
        let email = person
            .attributes
            .email
            .as_deref()
            .map(|address| format!(" <{}>", address))
            .unwrap_or_default();
        output.push_str(&format!("  [{}] {}{}\n", person.id, name, email));
    }
    Ok(output)
}
