// tests/inbox_view.rs
// Inbox aggregation against a fixture resource client

use async_trait::async_trait;
use productive_mcp::api::types::{CommentAttributes, ListDocument, TaskAttributes};
use productive_mcp::api::ResourceClient;
use productive_mcp::config::CommentErrorPolicy;
use productive_mcp::error::{ProductiveError, Result};
use productive_mcp::inbox::{build_inbox, InboxContext};
use serde_json::json;
use std::collections::{HashMap, HashSet};

// ============================================================================
// Fixture client
// ============================================================================

struct FixtureClient {
    tasks: serde_json::Value,
    comments: HashMap<String, serde_json::Value>,
    failing: HashSet<String>,
}

impl FixtureClient {
    fn new(tasks: serde_json::Value) -> Self {
        Self {
            tasks,
            comments: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    fn with_comments(mut self, task_id: &str, doc: serde_json::Value) -> Self {
        self.comments.insert(task_id.to_string(), doc);
        self
    }

    fn with_failing(mut self, task_id: &str) -> Self {
        self.failing.insert(task_id.to_string());
        self
    }
}

#[async_trait]
impl ResourceClient for FixtureClient {
    async fn open_tasks(
        &self,
        _assignee_id: &str,
        _limit: u32,
    ) -> Result<ListDocument<TaskAttributes>> {
        Ok(serde_json::from_value(self.tasks.clone())?)
    }

    async fn latest_comment(&self, task_id: &str) -> Result<ListDocument<CommentAttributes>> {
        if self.failing.contains(task_id) {
            return Err(ProductiveError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        let doc = self
            .comments
            .get(task_id)
            .cloned()
            .unwrap_or_else(|| json!({ "data": [] }));
        Ok(serde_json::from_value(doc)?)
    }
}

fn ctx() -> InboxContext {
    InboxContext {
        user_id: "561888".to_string(),
        organization_id: "4321".to_string(),
        limit: 10,
        concurrency: 10,
        comment_errors: CommentErrorPolicy::Fail,
    }
}

fn two_task_fixture() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "101", "type": "tasks",
                "attributes": {
                    "title": "Ship the login fix",
                    "last_activity_at": "2026-08-24T09:00:00.000Z"
                },
                "relationships": {
                    "project": { "data": { "type": "projects", "id": "7" } }
                }
            },
            {
                "id": "102", "type": "tasks",
                "attributes": {
                    "title": "Update onboarding docs",
                    "description": "<p>fix the login flow</p>",
                    "updated_at": "2026-08-20T09:00:00.000Z"
                }
            }
        ],
        "included": [
            { "type": "projects", "id": "7", "attributes": { "name": "Website" } }
        ],
        "meta": { "total_count": 2 }
    })
}

fn comment_doc(id: &str, body: &str) -> serde_json::Value {
    json!({
        "data": [
            {
                "id": id, "type": "comments",
                "attributes": { "body": body, "created_at": "2026-08-24T08:00:00.000Z" },
                "relationships": {
                    "creator": { "data": { "type": "people", "id": "55" } }
                }
            }
        ],
        "included": [
            {
                "type": "people", "id": "55",
                "attributes": { "first_name": "Marko", "last_name": "Novak" }
            }
        ]
    })
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_two_task_inbox_renders_both_blocks_in_order() {
    let client = FixtureClient::new(two_task_fixture())
        .with_comments("101", comment_doc("c1", "is this ready to ship?"));
    let output = build_inbox(&client, &ctx()).await.unwrap();

    assert!(output.starts_with("Showing 2 of 2 open tasks in your inbox:"));

    let first = output.find("Ship the login fix").unwrap();
    let second = output.find("Update onboarding docs").unwrap();
    assert!(first < second, "tasks must keep API order:\n{}", output);

    // Block 1: latest comment with resolved author
    assert!(output.contains("Marko Novak: is this ready to ship?"));
    // Block 2: no comment, so the stripped description
    assert!(output.contains("Description: fix the login flow"));

    // Exactly one suggestion, for task 1
    assert!(output.contains("Suggested Actions:"));
    let suggestion_lines: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("- Task "))
        .collect();
    assert_eq!(suggestion_lines.len(), 1, "output:\n{}", output);
    assert_eq!(
        suggestion_lines[0],
        "- Task 1: asked a question by Marko Novak"
    );
}

#[tokio::test]
async fn test_header_links_and_project_names() {
    let client = FixtureClient::new(two_task_fixture());
    let output = build_inbox(&client, &ctx()).await.unwrap();

    assert!(output.contains("https://app.productive.io/4321/tasks/101"));
    assert!(output.contains("https://app.productive.io/4321/tasks/102"));
    assert!(output.contains("Website"));
    // Task 102 has no project relationship
    assert!(output.contains("Unknown Project"));
}

#[tokio::test]
async fn test_empty_inbox_is_terminal_message() {
    let client = FixtureClient::new(json!({ "data": [] }));
    let output = build_inbox(&client, &ctx()).await.unwrap();
    assert_eq!(output, "No open tasks in your inbox.");
}

#[tokio::test]
async fn test_task_without_comment_or_description_shows_no_content() {
    let tasks = json!({
        "data": [
            { "id": "300", "type": "tasks", "attributes": { "title": "Bare task" } }
        ]
    });
    let client = FixtureClient::new(tasks);
    let output = build_inbox(&client, &ctx()).await.unwrap();
    assert!(output.contains("No content"), "output:\n{}", output);
    assert!(!output.contains("Suggested Actions:"));
}

#[tokio::test]
async fn test_server_side_total_in_summary() {
    let mut fixture = two_task_fixture();
    fixture["meta"]["total_count"] = json!(7);
    let client = FixtureClient::new(fixture);
    let output = build_inbox(&client, &ctx()).await.unwrap();
    assert!(output.starts_with("Showing 2 of 7 open tasks in your inbox:"));
}

#[tokio::test]
async fn test_unresolved_comment_author_is_unknown() {
    // Creator 99 is not in the included people
    let orphan_comment = json!({
        "data": [
            {
                "id": "c9", "type": "comments",
                "attributes": { "body": "done?" },
                "relationships": { "creator": { "data": { "type": "people", "id": "99" } } }
            }
        ]
    });
    let client = FixtureClient::new(two_task_fixture()).with_comments("101", orphan_comment);
    let output = build_inbox(&client, &ctx()).await.unwrap();
    assert!(output.contains("Unknown: done?"));
    assert!(output.contains("- Task 1: asked a question by Unknown"));
}

#[tokio::test]
async fn test_comment_is_normalized_and_classified() {
    let body = r#"<p>can you review this? <span data-mention='{"id": 7, "label": "bob"}'>bob</span></p>"#;
    let client = FixtureClient::new(two_task_fixture()).with_comments("101", comment_doc("c2", body));
    let output = build_inbox(&client, &ctx()).await.unwrap();

    assert!(output.contains("Marko Novak: can you review this? @bob"));
    assert!(output.contains("- Task 1: review requested by Marko Novak"));
}

#[tokio::test]
async fn test_long_comment_is_truncated_to_budget() {
    let body = "x".repeat(250);
    let client =
        FixtureClient::new(two_task_fixture()).with_comments("101", comment_doc("c3", &body));
    let output = build_inbox(&client, &ctx()).await.unwrap();

    let line = output
        .lines()
        .find(|line| line.starts_with("Marko Novak: "))
        .unwrap();
    let rendered = line.trim_start_matches("Marko Novak: ");
    assert_eq!(rendered.chars().count(), 200);
    assert!(rendered.ends_with("..."));
}

// ============================================================================
// Fan-out ordering and failure policy
// ============================================================================

#[tokio::test]
async fn test_comments_join_their_own_tasks_under_narrow_concurrency() {
    let tasks = json!({
        "data": (1..=5).map(|n| json!({
            "id": format!("40{}", n), "type": "tasks",
            "attributes": { "title": format!("Task number {}", n) }
        })).collect::<Vec<_>>()
    });
    let mut client = FixtureClient::new(tasks);
    for n in 1..=5 {
        let id = format!("40{}", n);
        client = client.with_comments(&id, comment_doc(&id, &format!("note for {}", id)));
    }
    let narrow = InboxContext {
        concurrency: 2,
        ..ctx()
    };
    let output = build_inbox(&client, &narrow).await.unwrap();

    // Each block carries its own comment, in task order
    let mut last = 0;
    for n in 1..=5 {
        let pos = output
            .find(&format!("note for 40{}", n))
            .unwrap_or_else(|| panic!("missing comment for 40{}:\n{}", n, output));
        assert!(pos > last);
        last = pos;
    }
}

#[tokio::test]
async fn test_inbox_view_builds_from_a_spawned_task() {
    // The MCP dispatcher requires the inbox future to be Send; spawning
    // imposes the same bound.
    let client = FixtureClient::new(two_task_fixture())
        .with_comments("101", comment_doc("c1", "is this ready to ship?"));
    let handle = tokio::spawn(async move { build_inbox(&client, &ctx()).await });
    let output = handle.await.unwrap().unwrap();
    assert!(output.starts_with("Showing 2 of 2 open tasks in your inbox:"));
    assert!(output.contains("Marko Novak: is this ready to ship?"));
}

#[tokio::test]
async fn test_failed_comment_fetch_fails_inbox_under_fail_policy() {
    let client = FixtureClient::new(two_task_fixture())
        .with_comments("101", comment_doc("c1", "hello"))
        .with_failing("102");
    let err = build_inbox(&client, &ctx()).await.unwrap_err();
    assert!(err.to_string().contains("500"), "err: {}", err);
}

#[tokio::test]
async fn test_failed_comment_fetch_degrades_task_under_skip_policy() {
    let client = FixtureClient::new(two_task_fixture())
        .with_comments("102", comment_doc("c1", "docs are stale"))
        .with_failing("101");
    let skip = InboxContext {
        comment_errors: CommentErrorPolicy::Skip,
        ..ctx()
    };
    let output = build_inbox(&client, &skip).await.unwrap();

    // Task 101 has no description, so the failed fetch degrades it to No content
    assert!(output.contains("No content"), "output:\n{}", output);
    // Task 102 still renders its comment
    assert!(output.contains("Marko Novak: docs are stale"));
}

// ============================================================================
// Tool-level guard
// ============================================================================

#[tokio::test]
async fn test_task_inbox_without_user_id_short_circuits() {
    use productive_mcp::config::Config;
    use productive_mcp::mcp::tools::inbox::{task_inbox, USER_NOT_CONFIGURED};
    use productive_mcp::mcp::ProductiveServer;

    let config = Config {
        api_token: "tok".to_string(),
        organization_id: "4321".to_string(),
        user_id: None,
        base_url: "https://api.invalid/api/v2".to_string(),
        comment_errors: CommentErrorPolicy::Fail,
        inbox_concurrency: 10,
    };
    let server = ProductiveServer::new(config);
    // No network call happens; the fixed message comes back immediately
    let output = task_inbox(&server, Some(5)).await.unwrap();
    assert_eq!(output, USER_NOT_CONFIGURED);
}
