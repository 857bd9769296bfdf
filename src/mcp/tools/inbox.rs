// src/mcp/tools/inbox.rs
// The task_inbox tool

use crate::config::{DEFAULT_INBOX_LIMIT, MAX_INBOX_LIMIT};
use crate::inbox::{self, InboxContext};
use crate::mcp::ProductiveServer;

/// Fixed reply when no user id is configured; informational, not an error,
/// and sent before any network call
pub const USER_NOT_CONFIGURED: &str =
    "No Productive user is configured. Set PRODUCTIVE_USER_ID to enable the task inbox.";

pub async fn task_inbox(server: &ProductiveServer, limit: Option<u32>) -> Result<String, String> {
    let Some(user_id) = server.config.user_id.clone() else {
        return Ok(USER_NOT_CONFIGURED.to_string());
    };
    let ctx = InboxContext {
        user_id,
        organization_id: server.config.organization_id.clone(),
        limit: limit.unwrap_or(DEFAULT_INBOX_LIMIT).clamp(1, MAX_INBOX_LIMIT),
        concurrency: server.config.inbox_concurrency,
        comment_errors: server.config.comment_errors,
    };
    Ok(inbox::build_inbox(server.client.as_ref(), &ctx).await?)
}
