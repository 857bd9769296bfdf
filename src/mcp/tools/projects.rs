// src/mcp/tools/projects.rs
// Project structure: projects, boards, task lists, workflow statuses

use super::{list_header, relationship, DEFAULT_PAGE_SIZE};
use crate::api::query::Query;
use crate::api::types::{
    BoardAttributes, ProjectAttributes, TaskListAttributes, WorkflowStatusAttributes,
};
use crate::mcp::ProductiveServer;

pub async fn list_projects(
    server: &ProductiveServer,
    name: Option<String>,
) -> Result<String, String> {
    let mut query = Query::new().sort("name").page_size(DEFAULT_PAGE_SIZE);
    if let Some(name) = name {
        query = query.filter("name", name);
    }
    let doc = server
        .client
        .list::<ProjectAttributes>("projects", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok("No projects found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "projects");
    for project in &doc.data {
        let number = project
            .attributes
            .project_number
            .map(|n| format!(" (#{})", n))
            .unwrap_or_default();
        output.push_str(&format!(
            "  [{}] {}{}\n",
            project.id, project.attributes.name, number
        ));
    }
    Ok(output)
}

pub async fn list_boards(server: &ProductiveServer, project_id: String) -> Result<String, String> {
    let query = Query::new()
        .filter("project_id", project_id.as_str())
        .page_size(DEFAULT_PAGE_SIZE);
    let doc = server.client.list::<BoardAttributes>("boards", &query).await?;
    if doc.data.is_empty() {
        return Ok(format!("No boards in project {}.", project_id));
    }

    let mut output = list_header(doc.data.len(), doc.total(), "boards");
    for board in &doc.data {
        output.push_str(&format!("  [{}] {}\n", board.id, board.attributes.name));
    }
    Ok(output)
}

pub async fn list_task_lists(
    server: &ProductiveServer,
    board_id: String,
) -> Result<String, String> {
    let query = Query::new()
        .filter("board_id", board_id.as_str())
        .sort("position")
        .page_size(DEFAULT_PAGE_SIZE);
    let doc = server
        .client
        .list::<TaskListAttributes>("task_lists", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok(format!("No task lists on board {}.", board_id));
    }

    let mut output = list_header(doc.data.len(), doc.total(), "task lists");
    for list in &doc.data {
        output.push_str(&format!("  [{}] {}\n", list.id, list.attributes.name));
    }
    Ok(output)
}

pub async fn create_task_list(
    server: &ProductiveServer,
    project_id: String,
    board_id: String,
    name: String,
) -> Result<String, String> {
    if name.trim().is_empty() {
        return Err("Task list name must not be empty".to_string());
    }
    let body = serde_json::json!({
        "data": {
            "type": "task_lists",
            "attributes": { "name": name },
            "relationships": {
                "project": relationship("projects", &project_id),
                "board": relationship("boards", &board_id),
            }
        }
    });
    let doc = server
        .client
        .create::<TaskListAttributes>("task_lists", body)
        .await?;
    Ok(format!(
        "Created task list '{}' (id: {})",
        doc.data.attributes.name, doc.data.id
    ))
}

pub async fn list_workflow_statuses(server: &ProductiveServer) -> Result<String, String> {
    let query = Query::new().page_size(DEFAULT_PAGE_SIZE);
    let doc = server
        .client
        .list::<WorkflowStatusAttributes>("workflow_statuses", &query)
        .await?;
    if doc.data.is_empty() {
        return Ok("No workflow statuses found.".to_string());
    }

    let mut output = list_header(doc.data.len(), doc.total(), "workflow statuses");
    for status in &doc.data {
        let category = match status.attributes.category_id {
            Some(1) => "not started",
            Some(2) => "started",
            Some(3) => "closed",
            _ => "uncategorized",
        };
        output.push_str(&format!(
            "  [{}] {} ({})\n",
            status.id, status.attributes.name, category
        ));
    }
    Ok(output)
}
