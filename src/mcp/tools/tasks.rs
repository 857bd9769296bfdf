// src/mcp/tools/tasks.rs
// Task reading and writing

use super::{list_header, relationship, validate_date, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::TaskAttributes;
use crate::api::{self, TASK_STATUS_CLOSED, TASK_STATUS_OPEN};
use crate::mcp::ProductiveServer;
use crate::normalize::{collapse_mentions, relative_age, strip_markup};

fn tasks_query(
    assignee_id: Option<String>,
    project_id: Option<String>,
    status: Option<String>,
    limit: Option<u32>,
    page: Option<u32>,
) -> Result<Query, String> {
    let mut query = Query::new()
        .sort("-last_activity_at")
        .page_size(limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE));
    match status.as_deref().unwrap_or("open") {
        "open" => query = query.filter("status", TASK_STATUS_OPEN),
        "closed" => query = query.filter("status", TASK_STATUS_CLOSED),
        "all" => {}
        other => {
            return Err(format!(
                "Unknown status filter: {}. Use open, closed or all",
                other
            ))
        }
    }
    if let Some(id) = assignee_id {
        query = query.filter("assignee_id", id);
    }
    if let Some(id) = project_id {
        query = query.filter("project_id", id);
    }
    if let Some(number) = page {
        query = query.page_number(number);
    }
    Ok(query)
}

pub async fn list_tasks(
    server: &ProductiveServer,
    assignee_id: Option<String>,
    project_id: Option<String>,
    status: Option<String>,
    limit: Option<u32>,
    page: Option<u32>,
) -> Result<String, String> {
    let query = tasks_query(assignee_id, project_id, status, limit, page)?;
    let doc = server.client.list::<TaskAttributes>("tasks", &query).await?;
    if doc.data.is_empty() {
        return Ok("No tasks found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "tasks");
    for task in &doc.data {
        let mut line = format!("  [{}] {}", task.id, task.attributes.title);
        if !task.attributes.is_open() {
            line.push_str(" (closed)");
        }
        if let Some(due) = &task.attributes.due_date {
            line.push_str(&format!(" (due {})", due));
        }
        line.push('\n');
        output.push_str(&line);
    }
    Ok(output)
}

pub async fn get_task(server: &ProductiveServer, task_id: String) -> Result<String, String> {
    let query = Query::new().include("project");
    let doc = server
        .client
        .fetch::<TaskAttributes>(&format!("tasks/{}", task_id), &query)
        .await?;
    let task = &doc.data;
    let project = task
        .related_id("project")
        .and_then(|id| doc.projects().find(|p| p.id == id))
        .map(|p| p.attributes.name.clone());

    let mut output = format!("# {}\n", task.attributes.title);
    output.push_str(&format!(
        "URL: {}\n",
        api::task_url(&server.config.organization_id, &task.id)
    ));
    if let Some(number) = task.attributes.task_number {
        output.push_str(&format!("Number: #{}\n", number));
    }
    output.push_str(&format!(
        "Project: {}\n",
        project.as_deref().unwrap_or("Unknown Project")
    ));
    output.push_str(&format!(
        "Status: {}\n",
        if task.attributes.is_open() { "open" } else { "closed" }
    ));
    if let Some(due) = &task.attributes.due_date {
        output.push_str(&format!("Due: {}\n", due));
    }
    if let Some(timestamp) = task.attributes.recency() {
        output.push_str(&format!("Last activity: {}\n", relative_age(timestamp)));
    }
    if let Some(raw) = &task.attributes.description {
        let description = strip_markup(&collapse_mentions(raw));
        if !description.is_empty() {
            output.push_str(&format!("\n{}\n", description));
        }
    }
    Ok(output)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_task(
    server: &ProductiveServer,
    title: String,
    project_id: Option<String>,
    board_id: Option<String>,
    task_list_id: Option<String>,
    assignee_id: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
) -> Result<String, String> {
    if title.trim().is_empty() {
        return Err("Task title must not be empty".to_string());
    }
    if let Some(date) = &due_date {
        validate_date(date)?;
    }

    let mut attributes = serde_json::Map::new();
    attributes.insert("title".to_string(), serde_json::json!(title));
    if let Some(text) = description {
        attributes.insert("description".to_string(), serde_json::json!(text));
    }
    if let Some(date) = due_date {
        attributes.insert("due_date".to_string(), serde_json::json!(date));
    }

    let mut relationships = serde_json::Map::new();
    if let Some(id) = project_id {
        relationships.insert("project".to_string(), relationship("projects", &id));
    }
    if let Some(id) = board_id {
        relationships.insert("board".to_string(), relationship("boards", &id));
    }
    if let Some(id) = task_list_id {
        relationships.insert("task_list".to_string(), relationship("task_lists", &id));
    }
    if let Some(id) = assignee_id {
        relationships.insert("assignee".to_string(), relationship("people", &id));
    }

    let body = serde_json::json!({
        "data": {
            "type": "tasks",
            "attributes": attributes,
            "relationships": relationships,
        }
    });
    let doc = server.client.create::<TaskAttributes>("tasks", body).await?;
    Ok(format!(
        "Created task '{}' (id: {})",
        doc.data.attributes.title, doc.data.id
    ))
}

#[allow(clippy::too_many_arguments)]
pub async fn update_task(
    server: &ProductiveServer,
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    assignee_id: Option<String>,
    task_list_id: Option<String>,
    position: Option<i64>,
    close: Option<bool>,
) -> Result<String, String> {
    if let Some(date) = &due_date {
        validate_date(date)?;
    }

    let mut attributes = serde_json::Map::new();
    if let Some(text) = title {
        attributes.insert("title".to_string(), serde_json::json!(text));
    }
    if let Some(text) = description {
        attributes.insert("description".to_string(), serde_json::json!(text));
    }
    if let Some(date) = due_date {
        attributes.insert("due_date".to_string(), serde_json::json!(date));
    }
    if let Some(value) = position {
        attributes.insert("position".to_string(), serde_json::json!(value));
    }
    if let Some(value) = close {
        attributes.insert("closed".to_string(), serde_json::json!(value));
    }

    // Repositioning needs a target list. When the caller did not name one,
    // pin the task to its current list so the move happens in place.
    let mut task_list_id = task_list_id;
    if position.is_some() && task_list_id.is_none() {
        let current = server
            .client
            .fetch::<TaskAttributes>(&format!("tasks/{}", task_id), &Query::new())
            .await?;
        task_list_id = current.data.related_id("task_list").map(String::from);
    }

    let mut relationships = serde_json::Map::new();
    if let Some(id) = assignee_id {
        relationships.insert("assignee".to_string(), relationship("people", &id));
    }
    if let Some(id) = task_list_id {
        relationships.insert("task_list".to_string(), relationship("task_lists", &id));
    }

    if attributes.is_empty() && relationships.is_empty() {
        return Err("Nothing to update: pass at least one field".to_string());
    }

    let mut data = serde_json::Map::new();
    data.insert("type".to_string(), serde_json::json!("tasks"));
    data.insert("id".to_string(), serde_json::json!(task_id));
    data.insert("attributes".to_string(), serde_json::json!(attributes));
    if !relationships.is_empty() {
        data.insert(
            "relationships".to_string(),
            serde_json::json!(relationships),
        );
    }

    let doc = server
        .client
        .update::<TaskAttributes>(&format!("tasks/{}", task_id), serde_json::json!({ "data": data }))
        .await?;
    Ok(format!(
        "Updated task '{}' (id: {}, {})",
        doc.data.attributes.title,
        doc.data.id,
        if doc.data.attributes.is_open() { "open" } else { "closed" }
    ))
}
