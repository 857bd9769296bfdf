// src/config.rs
// Environment-based configuration - single source of truth for all env vars

use crate::error::{ProductiveError, Result};
use tracing::{debug, warn};
use url::Url;

/// Production API endpoint, overridable for testing via PRODUCTIVE_BASE_URL
pub const DEFAULT_BASE_URL: &str = "https://api.productive.io/api/v2";

/// Default number of tasks shown in the inbox
pub const DEFAULT_INBOX_LIMIT: u32 = 10;
/// Hard cap on tasks per inbox request
pub const MAX_INBOX_LIMIT: u32 = 50;

/// Default concurrent comment fetches during the inbox fan-out
const DEFAULT_INBOX_CONCURRENCY: usize = 10;
/// Upper bound on the fan-out width, to stay polite to the API
const MAX_INBOX_CONCURRENCY: usize = 50;

/// What to do when one per-task comment fetch fails during the inbox fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentErrorPolicy {
    /// Any failed fetch fails the whole inbox view
    #[default]
    Fail,
    /// A failed fetch degrades that one task to its no-comment rendering
    Skip,
}

impl CommentErrorPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fail" | "fail_fast" => Some(CommentErrorPolicy::Fail),
            "skip" | "best_effort" => Some(CommentErrorPolicy::Skip),
            _ => None,
        }
    }
}

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// API token (PRODUCTIVE_API_TOKEN), sent as X-Auth-Token
    pub api_token: String,
    /// Organization id (PRODUCTIVE_ORG_ID), sent as X-Organization-Id and
    /// used to build task links
    pub organization_id: String,
    /// Person id of the configured user (PRODUCTIVE_USER_ID); the task
    /// inbox is unavailable without it
    pub user_id: Option<String>,
    /// API base URL (PRODUCTIVE_BASE_URL), no trailing slash
    pub base_url: String,
    /// Partial-failure policy for the inbox comment fan-out
    /// (PRODUCTIVE_INBOX_COMMENT_ERRORS: fail | skip)
    pub comment_errors: CommentErrorPolicy,
    /// Fan-out width for inbox comment fetches (PRODUCTIVE_INBOX_CONCURRENCY)
    pub inbox_concurrency: usize,
}

impl Config {
    /// Load configuration from the environment. Fails on a missing token or
    /// organization id; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let api_token = read_var("PRODUCTIVE_API_TOKEN").ok_or_else(|| {
            ProductiveError::Config("PRODUCTIVE_API_TOKEN is not set".to_string())
        })?;
        let organization_id = read_var("PRODUCTIVE_ORG_ID").ok_or_else(|| {
            ProductiveError::Config("PRODUCTIVE_ORG_ID is not set".to_string())
        })?;
        let user_id = read_var("PRODUCTIVE_USER_ID");

        let base_url = match read_var("PRODUCTIVE_BASE_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| {
                    ProductiveError::Config(format!(
                        "PRODUCTIVE_BASE_URL is not a valid URL: {}",
                        e
                    ))
                })?;
                raw.trim_end_matches('/').to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let comment_errors = match read_var("PRODUCTIVE_INBOX_COMMENT_ERRORS") {
            Some(raw) => CommentErrorPolicy::parse(&raw).unwrap_or_else(|| {
                warn!(
                    "Unknown PRODUCTIVE_INBOX_COMMENT_ERRORS value '{}', using 'fail'",
                    raw
                );
                CommentErrorPolicy::Fail
            }),
            None => CommentErrorPolicy::default(),
        };

        let inbox_concurrency = match read_var("PRODUCTIVE_INBOX_CONCURRENCY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) => n.clamp(1, MAX_INBOX_CONCURRENCY),
                Err(_) => {
                    warn!(
                        "PRODUCTIVE_INBOX_CONCURRENCY is not a number ('{}'), using {}",
                        raw, DEFAULT_INBOX_CONCURRENCY
                    );
                    DEFAULT_INBOX_CONCURRENCY
                }
            },
            None => DEFAULT_INBOX_CONCURRENCY,
        };

        let config = Config {
            api_token,
            organization_id,
            user_id,
            base_url,
            comment_errors,
            inbox_concurrency,
        };
        config.log_status();
        Ok(config)
    }

    /// One-line-per-setting summary for `productive-mcp check`. Never
    /// includes the token itself.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  Organization: {}\n", self.organization_id));
        out.push_str(&format!(
            "  User: {}\n",
            self.user_id.as_deref().unwrap_or("(not set - task inbox disabled)")
        ));
        out.push_str(&format!("  Base URL: {}\n", self.base_url));
        out.push_str(&format!(
            "  Inbox: concurrency {}, comment errors {}\n",
            self.inbox_concurrency,
            match self.comment_errors {
                CommentErrorPolicy::Fail => "fail",
                CommentErrorPolicy::Skip => "skip",
            }
        ));
        out
    }

    fn log_status(&self) {
        debug!(
            organization_id = %self.organization_id,
            base_url = %self.base_url,
            "Productive configuration loaded"
        );
        if self.user_id.is_none() {
            warn!("PRODUCTIVE_USER_ID is not set; the task_inbox tool will be unavailable");
        }
    }
}

/// Read an env var, treating blank values as unset
fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
