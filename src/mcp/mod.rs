// src/mcp/mod.rs
// MCP server implementation

pub mod tools;

use crate::api::ProductiveClient;
use crate::config::Config;
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    schemars,
    service::{RequestContext, RoleServer},
    tool, tool_router, ErrorData, ServerHandler,
};
use serde::Deserialize;
use std::sync::Arc;

/// MCP server state
#[derive(Clone)]
pub struct ProductiveServer {
    pub config: Arc<Config>,
    pub client: Arc<ProductiveClient>,
    tool_router: ToolRouter<Self>,
}

impl ProductiveServer {
    pub fn new(config: Config) -> Self {
        let client = Arc::new(ProductiveClient::new(&config));
        Self {
            config: Arc::new(config),
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// Request types for tools with parameters

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskInboxRequest {
    #[schemars(description = "Max tasks to show (1-50, default 10)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCompaniesRequest {
    #[schemars(description = "Filter by company name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    #[schemars(description = "Filter by project name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListBoardsRequest {
    #[schemars(description = "Project ID")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTaskListsRequest {
    #[schemars(description = "Board ID")]
    pub board_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTaskListRequest {
    #[schemars(description = "Project ID")]
    pub project_id: String,
    #[schemars(description = "Board ID")]
    pub board_id: String,
    #[schemars(description = "Task list name")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTasksRequest {
    #[schemars(description = "Filter by assignee person ID")]
    pub assignee_id: Option<String>,
    #[schemars(description = "Filter by project ID")]
    pub project_id: Option<String>,
    #[schemars(description = "Status: open/closed/all (default open)")]
    pub status: Option<String>,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<u32>,
    #[schemars(description = "Page number, 1-based")]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTaskRequest {
    #[schemars(description = "Task ID")]
    pub task_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTaskRequest {
    #[schemars(description = "Task title")]
    pub title: String,
    #[schemars(description = "Project ID")]
    pub project_id: Option<String>,
    #[schemars(description = "Board ID")]
    pub board_id: Option<String>,
    #[schemars(description = "Task list ID")]
    pub task_list_id: Option<String>,
    #[schemars(description = "Assignee person ID")]
    pub assignee_id: Option<String>,
    #[schemars(description = "Description")]
    pub description: Option<String>,
    #[schemars(description = "Due date (YYYY-MM-DD)")]
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateTaskRequest {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "New title")]
    pub title: Option<String>,
    #[schemars(description = "New description")]
    pub description: Option<String>,
    #[schemars(description = "New due date (YYYY-MM-DD)")]
    pub due_date: Option<String>,
    #[schemars(description = "New assignee person ID")]
    pub assignee_id: Option<String>,
    #[schemars(description = "Move to task list ID")]
    pub task_list_id: Option<String>,
    #[schemars(description = "Position within the task list, 1-based")]
    pub position: Option<i64>,
    #[schemars(description = "true to close the task, false to reopen it")]
    pub close: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCommentsRequest {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateCommentRequest {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "Comment body")]
    pub body: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPeopleRequest {
    #[schemars(description = "Filter by name")]
    pub name: Option<String>,
    #[schemars(description = "Filter by email")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTimeEntriesRequest {
    #[schemars(description = "Filter by person ID")]
    pub person_id: Option<String>,
    #[schemars(description = "Entries on or after this date (YYYY-MM-DD)")]
    pub after: Option<String>,
    #[schemars(description = "Entries on or before this date (YYYY-MM-DD)")]
    pub before: Option<String>,
    #[schemars(description = "Max results (1-200, default 30)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTimeEntryRequest {
    #[schemars(description = "Person ID")]
    pub person_id: String,
    #[schemars(description = "Service ID to book against")]
    pub service_id: String,
    #[schemars(description = "Date (YYYY-MM-DD)")]
    pub date: String,
    #[schemars(description = "Minutes worked")]
    pub minutes: i64,
    #[schemars(description = "Note")]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListServicesRequest {
    #[schemars(description = "Filter by service name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDealsRequest {
    #[schemars(description = "Filter by company ID")]
    pub company_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPagesRequest {
    #[schemars(description = "Filter by project ID")]
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageRequest {
    #[schemars(description = "Page ID")]
    pub page_id: String,
}

#[tool_router]
impl ProductiveServer {
    #[tool(
        description = "Your open-task inbox: most recently active tasks with their latest comments and suggested next actions."
    )]
    async fn task_inbox(
        &self,
        Parameters(req): Parameters<TaskInboxRequest>,
    ) -> Result<String, String> {
        tools::inbox::task_inbox(self, req.limit).await
    }

    #[tool(description = "List companies in the organization.")]
    async fn list_companies(
        &self,
        Parameters(req): Parameters<ListCompaniesRequest>,
    ) -> Result<String, String> {
        tools::companies::list_companies(self, req.name).await
    }

    #[tool(description = "List projects, optionally filtered by name.")]
    async fn list_projects(
        &self,
        Parameters(req): Parameters<ListProjectsRequest>,
    ) -> Result<String, String> {
        tools::projects::list_projects(self, req.name).await
    }

    #[tool(description = "List boards in a project.")]
    async fn list_boards(
        &self,
        Parameters(req): Parameters<ListBoardsRequest>,
    ) -> Result<String, String> {
        tools::projects::list_boards(self, req.project_id).await
    }

    #[tool(description = "List task lists on a board, in board order.")]
    async fn list_task_lists(
        &self,
        Parameters(req): Parameters<ListTaskListsRequest>,
    ) -> Result<String, String> {
        tools::projects::list_task_lists(self, req.board_id).await
    }

    #[tool(description = "Create a task list on a board.")]
    async fn create_task_list(
        &self,
        Parameters(req): Parameters<CreateTaskListRequest>,
    ) -> Result<String, String> {
        tools::projects::create_task_list(self, req.project_id, req.board_id, req.name).await
    }

    #[tool(description = "List workflow statuses and their categories.")]
    async fn list_workflow_statuses(&self) -> Result<String, String> {
        tools::projects::list_workflow_statuses(self).await
    }

    #[tool(description = "List tasks filtered by assignee, project and status.")]
    async fn list_tasks(
        &self,
        Parameters(req): Parameters<ListTasksRequest>,
    ) -> Result<String, String> {
        tools::tasks::list_tasks(
            self,
            req.assignee_id,
            req.project_id,
            req.status,
            req.limit,
            req.page,
        )
        .await
    }

    #[tool(description = "Get one task with its project, status, dates and description.")]
    async fn get_task(
        &self,
        Parameters(req): Parameters<GetTaskRequest>,
    ) -> Result<String, String> {
        tools::tasks::get_task(self, req.task_id).await
    }

    #[tool(description = "Create a task.")]
    async fn create_task(
        &self,
        Parameters(req): Parameters<CreateTaskRequest>,
    ) -> Result<String, String> {
        tools::tasks::create_task(
            self,
            req.title,
            req.project_id,
            req.board_id,
            req.task_list_id,
            req.assignee_id,
            req.description,
            req.due_date,
        )
        .await
    }

    #[tool(
        description = "Update a task: edit fields, reassign, move between lists, reposition, close or reopen."
    )]
    async fn update_task(
        &self,
        Parameters(req): Parameters<UpdateTaskRequest>,
    ) -> Result<String, String> {
        tools::tasks::update_task(
            self,
            req.task_id,
            req.title,
            req.description,
            req.due_date,
            req.assignee_id,
            req.task_list_id,
            req.position,
            req.close,
        )
        .await
    }

    #[tool(description = "List comments on a task, newest first.")]
    async fn list_comments(
        &self,
        Parameters(req): Parameters<ListCommentsRequest>,
    ) -> Result<String, String> {
        tools::comments::list_comments(self, req.task_id, req.limit).await
    }

    #[tool(description = "Add a comment to a task.")]
    async fn create_comment(
        &self,
        Parameters(req): Parameters<CreateCommentRequest>,
    ) -> Result<String, String> {
        tools::comments::create_comment(self, req.task_id, req.body).await
    }

    #[tool(description = "List people, optionally filtered by name or email.")]
    async fn list_people(
        &self,
        Parameters(req): Parameters<ListPeopleRequest>,
    ) -> Result<String, String> {
        tools::people::list_people(self, req.name, req.email).await
    }

    #[tool(description = "List time entries filtered by person and date range.")]
    async fn list_time_entries(
        &self,
        Parameters(req): Parameters<ListTimeEntriesRequest>,
    ) -> Result<String, String> {
        tools::time::list_time_entries(self, req.person_id, req.after, req.before, req.limit)
            .await
    }

    #[tool(description = "Log a time entry for a person against a service.")]
    async fn create_time_entry(
        &self,
        Parameters(req): Parameters<CreateTimeEntryRequest>,
    ) -> Result<String, String> {
        tools::time::create_time_entry(
            self,
            req.person_id,
            req.service_id,
            req.date,
            req.minutes,
            req.note,
        )
        .await
    }

    #[tool(description = "List billable services.")]
    async fn list_services(
        &self,
        Parameters(req): Parameters<ListServicesRequest>,
    ) -> Result<String, String> {
        tools::time::list_services(self, req.name).await
    }

    #[tool(description = "List deals and budgets, optionally for one company.")]
    async fn list_deals(
        &self,
        Parameters(req): Parameters<ListDealsRequest>,
    ) -> Result<String, String> {
        tools::deals::list_deals(self, req.company_id).await
    }

    #[tool(description = "List wiki pages, optionally for one project.")]
    async fn list_pages(
        &self,
        Parameters(req): Parameters<ListPagesRequest>,
    ) -> Result<String, String> {
        tools::pages::list_pages(self, req.project_id).await
    }

    #[tool(description = "Read one wiki page as plain text.")]
    async fn get_page(
        &self,
        Parameters(req): Parameters<GetPageRequest>,
    ) -> Result<String, String> {
        tools::pages::get_page(self, req.page_id).await
    }
}

impl ServerHandler for ProductiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "productive-mcp".into(),
                title: Some("Productive.io project management".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for a Productive.io workspace: browse companies, projects, boards and \
                 tasks, manage comments and time entries, and check your task inbox."
                    .into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let ctx = ToolCallContext::new(self, request, context);
            self.tool_router.call(ctx).await
        }
    }
}
