// src/api/mod.rs
// HTTP client for the Productive REST API (JSON:API over reqwest)

pub mod query;
pub mod types;

use crate::config::Config;
use crate::error::{ProductiveError, Result};
use async_trait::async_trait;
use query::Query;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use types::{CommentAttributes, ListDocument, OneDocument, TaskAttributes};

/// Request timeout; Productive is normally well under a second
const TIMEOUT_SECS: u64 = 30;
/// Productive rejects writes without the JSON:API content type
const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
/// Web app origin, used for task links in tool output
const APP_BASE_URL: &str = "https://app.productive.io";

/// `filter[status]` values for the tasks endpoint
pub const TASK_STATUS_OPEN: &str = "1";
pub const TASK_STATUS_CLOSED: &str = "2";

/// Canonical web-app link for a task
pub fn task_url(organization_id: &str, task_id: &str) -> String {
    format!("{}/{}/tasks/{}", APP_BASE_URL, organization_id, task_id)
}

/// Thin client over the Productive API. Cheap to clone via the inner
/// reqwest client; all calls are single-shot with no retries.
pub struct ProductiveClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    organization_id: String,
}

impl ProductiveClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            organization_id: config.organization_id.clone(),
        }
    }

    /// GET a list endpoint
    pub async fn list<A>(&self, path: &str, query: &Query) -> Result<ListDocument<A>>
    where
        A: DeserializeOwned,
    {
        let mut builder = self.request(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query.params());
        }
        self.send(builder, path).await
    }

    /// GET a single resource
    pub async fn fetch<A>(&self, path: &str, query: &Query) -> Result<OneDocument<A>>
    where
        A: DeserializeOwned,
    {
        let mut builder = self.request(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query.params());
        }
        self.send(builder, path).await
    }

    /// POST a JSON:API document, returning the created resource
    pub async fn create<A>(&self, path: &str, body: serde_json::Value) -> Result<OneDocument<A>>
    where
        A: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).body(body.to_string());
        self.send(builder, path).await
    }

    /// PATCH a JSON:API document, returning the updated resource
    pub async fn update<A>(&self, path: &str, body: serde_json::Value) -> Result<OneDocument<A>>
    where
        A: DeserializeOwned,
    {
        let builder = self.request(Method::PATCH, path).body(body.to_string());
        self.send(builder, path).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http
            .request(method, url)
            .header("X-Auth-Token", &self.api_token)
            .header("X-Organization-Id", &self.organization_id)
            .header("Content-Type", JSON_API_CONTENT_TYPE)
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let request_id = &request_id[..8];
        let started = std::time::Instant::now();

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_detail(&body).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("request failed").to_string()
            });
            warn!(request_id, %status, path, "Productive API request failed");
            return Err(ProductiveError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<T>().await?;
        debug!(
            request_id,
            path,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Productive API request ok"
        );
        Ok(parsed)
    }
}

/// Pull the human-readable detail out of a JSON:API error body:
/// `{"errors": [{"status": "404", "title": "...", "detail": "..."}]}`
fn api_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let first = value.get("errors")?.as_array()?.first()?;
    first
        .get("detail")
        .and_then(|d| d.as_str())
        .or_else(|| first.get("title").and_then(|t| t.as_str()))
        .map(String::from)
}

/// The two read paths the task inbox consumes, behind a trait so the
/// aggregator can run against fixtures.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Open tasks assigned to a person, most recent activity first, with
    /// parent projects inlined via `include=project`.
    async fn open_tasks(&self, assignee_id: &str, limit: u32)
        -> Result<ListDocument<TaskAttributes>>;

    /// The single most recent comment on a task, with its creator inlined
    /// via `include=creator`. An empty document means the task has no
    /// comments.
    async fn latest_comment(&self, task_id: &str) -> Result<ListDocument<CommentAttributes>>;
}

#[async_trait]
impl ResourceClient for ProductiveClient {
    async fn open_tasks(
        &self,
        assignee_id: &str,
        limit: u32,
    ) -> Result<ListDocument<TaskAttributes>> {
        let query = Query::new()
            .filter("assignee_id", assignee_id)
            .filter("status", TASK_STATUS_OPEN)
            .sort("-last_activity_at")
            .page_size(limit)
            .include("project");
        self.list("tasks", &query).await
    }

    async fn latest_comment(&self, task_id: &str) -> Result<ListDocument<CommentAttributes>> {
        let query = Query::new()
            .filter("task_id", task_id)
            .sort("-created_at")
            .page_size(1)
            .include("creator");
        self.list("comments", &query).await
    }
}
