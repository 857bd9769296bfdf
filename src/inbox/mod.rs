// src/inbox/mod.rs
// The task inbox: aggregates a person's open tasks with their latest
// comments and suggested next actions into one markdown view

pub mod suggest;

use crate::api::types::{CommentAttributes, ListDocument, Resource, TaskAttributes};
use crate::api::{self, ResourceClient};
use crate::config::CommentErrorPolicy;
use crate::error::Result;
use crate::normalize::{collapse_mentions, relative_age, strip_markup, truncate};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::warn;

/// Display budget for a comment body in the inbox view
const COMMENT_PREVIEW_CHARS: usize = 200;

/// Placeholders when a lookup has no entry
const UNKNOWN_PERSON: &str = "Unknown";
const UNKNOWN_PROJECT: &str = "Unknown Project";

/// An empty inbox is a terminal state, not an error
const EMPTY_INBOX: &str = "No open tasks in your inbox.";

/// Everything the aggregator needs from its caller. No ambient state; tests
/// construct this directly.
#[derive(Debug, Clone)]
pub struct InboxContext {
    /// Person whose assigned tasks make up the inbox
    pub user_id: String,
    /// Used to build task links
    pub organization_id: String,
    /// How many tasks to show, already clamped by the caller
    pub limit: u32,
    /// Fan-out width for the per-task comment fetches
    pub concurrency: usize,
    /// What a failed comment fetch does to the view
    pub comment_errors: CommentErrorPolicy,
}

/// Build the inbox view:
///
/// 1. fetch open tasks sorted by recent activity, projects included
/// 2. fan out one latest-comment fetch per task
/// 3. join comment creators from the included people
/// 4. render one block per task in the order the API returned them
pub async fn build_inbox<C>(client: &C, ctx: &InboxContext) -> Result<String>
where
    C: ResourceClient + ?Sized,
{
    let tasks = client.open_tasks(&ctx.user_id, ctx.limit).await?;
    if tasks.data.is_empty() {
        return Ok(EMPTY_INBOX.to_string());
    }

    let project_names: HashMap<String, String> = tasks
        .projects()
        .map(|project| (project.id.clone(), project.attributes.name.clone()))
        .collect();

    let comment_docs = fetch_latest_comments(client, &tasks.data, ctx).await?;

    let mut person_names: HashMap<String, String> = HashMap::new();
    for doc in comment_docs.iter().flatten() {
        for person in doc.people() {
            if let Some(name) = person.attributes.display_name() {
                person_names.insert(person.id.clone(), name);
            }
        }
    }

    let mut output = format!(
        "Showing {} of {} open tasks in your inbox:\n\n",
        tasks.data.len(),
        tasks.total()
    );
    let mut suggestions: Vec<String> = Vec::new();

    // comment_docs is index-aligned with tasks.data; the fan-out preserved
    // order, so zipping joins each task to its own latest comment.
    for (index, (task, doc)) in tasks.data.iter().zip(comment_docs.iter()).enumerate() {
        let ordinal = index + 1;
        let project = task
            .related_id("project")
            .and_then(|id| project_names.get(id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PROJECT);
        let age = match task.attributes.recency() {
            Some(timestamp) => relative_age(timestamp),
            None => "no recent activity".to_string(),
        };
        let url = api::task_url(&ctx.organization_id, &task.id);

        output.push_str(&format!(
            "{}. [{}]({}) - {} - {}\n",
            ordinal, task.attributes.title, url, project, age
        ));

        let latest = doc.as_ref().and_then(|d| d.data.first());
        match latest {
            Some(comment) => {
                let author = comment
                    .related_id("creator")
                    .and_then(|id| person_names.get(id))
                    .map(String::as_str)
                    .unwrap_or(UNKNOWN_PERSON);
                let body = comment
                    .attributes
                    .body
                    .as_deref()
                    .map(|raw| strip_markup(&collapse_mentions(raw)))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "{}: {}\n",
                    author,
                    truncate(&body, COMMENT_PREVIEW_CHARS)
                ));
                if let Some(action) = suggest::suggest_action(Some(&body), &task.attributes.title)
                {
                    suggestions.push(format!("- Task {}: {} by {}", ordinal, action, author));
                }
            }
            None => {
                let description = task
                    .attributes
                    .description
                    .as_deref()
                    .map(|raw| strip_markup(&collapse_mentions(raw)))
                    .filter(|text| !text.is_empty());
                match description {
                    Some(text) => output.push_str(&format!("Description: {}\n", text)),
                    None => output.push_str("No content\n"),
                }
                if let Some(action) = suggest::suggest_action(None, &task.attributes.title) {
                    suggestions.push(format!("- Task {}: {}", ordinal, action));
                }
            }
        }
        output.push('\n');
    }

    if !suggestions.is_empty() {
        output.push_str("Suggested Actions:\n");
        for line in &suggestions {
            output.push_str(line);
            output.push('\n');
        }
    }

    Ok(output.trim_end().to_string())
}

/// Fetch the latest comment for every task, at most `ctx.concurrency`
/// requests in flight, results in task order. `None` entries are tasks whose
/// fetch failed under the `Skip` policy; under `Fail` the first error wins
/// after the fan-out has drained.
async fn fetch_latest_comments<C>(
    client: &C,
    tasks: &[Resource<TaskAttributes>],
    ctx: &InboxContext,
) -> Result<Vec<Option<ListDocument<CommentAttributes>>>>
where
    C: ResourceClient + ?Sized,
{
    let task_ids: Vec<String> = tasks.iter().map(|task| task.id.clone()).collect();
    let results: Vec<(String, Result<ListDocument<CommentAttributes>>)> =
        stream::iter(task_ids)
            .map(|task_id| async move {
                let result = client.latest_comment(&task_id).await;
                (task_id, result)
            })
            .buffered(ctx.concurrency.max(1))
            .collect()
            .await;

    let mut docs = Vec::with_capacity(results.len());
    for (task_id, result) in results {
        match result {
            Ok(doc) => docs.push(Some(doc)),
            Err(e) if ctx.comment_errors == CommentErrorPolicy::Skip => {
                warn!(task_id = %task_id, error = %e, "comment fetch failed, task degrades to no-comment rendering");
                docs.push(None);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(docs)
}
