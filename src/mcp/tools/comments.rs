// src/mcp/tools/comments.rs
// Comment reading and writing

use super::{list_header, relationship, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::CommentAttributes;
use crate::mcp::ProductiveServer;
use crate::normalize::{collapse_mentions, relative_age, strip_markup, truncate};
use std::collections::HashMap;

/// Display budget for one comment in the list view
const LIST_PREVIEW_CHARS: usize = 120;

fn comments_query(task_id: &str, limit: Option<u32>) -> Query {
    Query::new()
        .filter("task_id", task_id)
        .sort("-created_at")
        .page_size(limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE))
        .include("creator")
}

pub async fn list_comments(
    server: &ProductiveServer,
    task_id: String,
    limit: Option<u32>,
) -> Result<String, String> {
    let query = comments_query(&task_id, limit);
    let doc = server
        .client
        .list::<CommentAttributes>("comments", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok(format!("No comments on task {}.", task_id));
    }

    let names: HashMap<&str, String> = doc
        .people()
        .filter_map(|person| {
            person
                .attributes
                .display_name()
                .map(|name| (person.id.as_str(), name))
        })
        .collect();

    let mut output = list_header(doc.data.len(), doc.total(), "comments");
    for comment in &doc.data {
        let author = comment
            .related_id("creator")
            .and_then(|id| names.get(id))
            .map(String::as_str)
            .unwrap_or("Unknown");
        let body = comment
            .attributes
            .body
            .as_deref()
            .map(|raw| strip_markup(&collapse_mentions(raw)).replace('\n', " "))
            .unwrap_or_default();
        let age = comment
            .attributes
            .created_at
            .map(relative_age)
            .unwrap_or_else(|| "undated".to_string());
        output.push_str(&format!(
            "  [{}] {} ({}): {}\n",
            comment.id,
            author,
            age,
            truncate(&body, LIST_PREVIEW_CHARS)
        ));
    }
    Ok(output)
}

pub async fn create_comment(
    server: &ProductiveServer,
    task_id: String,
    body: String,
) -> Result<String, String> {
    if body.trim().is_empty() {
        return Err("Comment body must not be empty".to_string());
    }
    let payload = serde_json::json!({
        "data": {
            "type": "comments",
            "attributes": { "body": body },
            "relationships": { "task": relationship("tasks", &task_id) }
        }
    });
    let doc = server
        .client
        .create::<CommentAttributes>("comments", payload)
        .await?;
    Ok(format!("Added comment to task {} (id: {})", task_id, doc.data.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a Query, key: &str) -> Option<&'a str> {
        query
            .params()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_comments_query_uses_shared_page_defaults() {
        let size = DEFAULT_PAGE_SIZE.to_string();
        let query = comments_query("9001", None);
        assert_eq!(param(&query, "page[size]"), Some(size.as_str()));
        assert_eq!(param(&query, "filter[task_id]"), Some("9001"));
        assert_eq!(param(&query, "sort"), Some("-created_at"));
        assert_eq!(param(&query, "include"), Some("creator"));
    }

    #[test]
    fn test_comments_query_clamps_oversized_limit() {
        let max = MAX_PAGE_SIZE.to_string();
        let query = comments_query("9001", Some(10_000));
        assert_eq!(param(&query, "page[size]"), Some(max.as_str()));
    }
}
