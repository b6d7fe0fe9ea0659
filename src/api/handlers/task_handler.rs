//! Task handlers.
//!
//! Visibility is assignee-or-creator; edits and status changes carry their
//! own policies and surface Forbidden when they fail.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::double_option;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{CreateTask, Task, UpdateTask};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Task creation request; the creator is the requester.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Call the client")]
    pub title: String,
    pub description: Option<String>,
    pub responsible_manager_id: Option<i32>,
    pub project_id: Option<i32>,
    pub subproject_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_task_status")]
    #[schema(example = "open")]
    pub status: String,
}

fn default_task_status() -> String {
    "open".to_string()
}

/// Task update request; descriptive fields only, omitted fields are left
/// untouched, explicit `null` clears nullable fields. Status has its own
/// operation.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub responsible_manager_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub project_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub subproject_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Status change request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetTaskStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "done")]
    pub status: String,
}

/// Task routes.
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .route("/:id/status", put(set_task_status))
}

/// List tasks within the requester's scope
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated task list"))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<Task>>> {
    let tasks = state.services.tasks().list(current.actor(), page).await?;
    Ok(ApiResponse::success(tasks))
}

/// Get a task by id
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found or out of scope")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Task>> {
    let task = state.services.tasks().get(current.actor(), id).await?;
    Ok(ApiResponse::success(task))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> AppResult<Created<Task>> {
    let task = state
        .services
        .tasks()
        .create(
            current.actor(),
            CreateTask {
                title: payload.title,
                description: payload.description,
                responsible_manager_id: payload.responsible_manager_id,
                project_id: payload.project_id,
                subproject_id: payload.subproject_id,
                due_date: payload.due_date,
                status: payload.status,
            },
        )
        .await?;
    Ok(Created(task))
}

/// Update a task's descriptive fields (creator or admin only)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 403, description = "Requester is not the creator"),
        (status = 404, description = "Task not found or out of scope")
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> AppResult<ApiResponse<Task>> {
    let task = state
        .services
        .tasks()
        .update(
            current.actor(),
            id,
            UpdateTask {
                title: payload.title,
                description: payload.description,
                responsible_manager_id: payload.responsible_manager_id,
                project_id: payload.project_id,
                subproject_id: payload.subproject_id,
                due_date: payload.due_date,
            },
        )
        .await?;
    Ok(ApiResponse::success(task))
}

/// Change a task's status (assignee or admin only)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/status",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task id")),
    request_body = SetTaskStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = Task),
        (status = 403, description = "Requester is not the assignee"),
        (status = 404, description = "Task not found or out of scope")
    )
)]
pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SetTaskStatusRequest>,
) -> AppResult<ApiResponse<Task>> {
    let task = state
        .services
        .tasks()
        .set_status(current.actor(), id, payload.status)
        .await?;
    Ok(ApiResponse::success(task))
}

/// Delete a task (creator or admin only)
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 403, description = "Requester is not the creator"),
        (status = 404, description = "Task not found or out of scope")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.tasks().delete(current.actor(), id).await?;
    Ok(NoContent)
}
