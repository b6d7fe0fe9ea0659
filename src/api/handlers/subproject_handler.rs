//! Sub-project handlers.
//!
//! Visibility is inherited from the parent project.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{CreateSubProject, SubProject, UpdateSubProject};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Sub-project creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubProjectRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Phase 1")]
    pub name: String,
    #[schema(value_type = String, example = "300.00")]
    pub cost: Decimal,
    /// Must exist in the status dictionary
    #[schema(example = "new")]
    pub status: String,
    pub project_id: i32,
}

/// Sub-project update request; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSubProjectRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "450.00")]
    pub cost: Option<Decimal>,
    pub status: Option<String>,
}

/// Kanban move request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetSubProjectStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "in_progress")]
    pub status: String,
}

/// Sub-project routes.
pub fn subproject_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subprojects).post(create_subproject))
        .route(
            "/:id",
            get(get_subproject)
                .put(update_subproject)
                .delete(delete_subproject),
        )
        .route("/:id/status", put(set_subproject_status))
}

/// List sub-projects of visible projects
#[utoipa::path(
    get,
    path = "/api/subprojects",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated sub-project list"))
)]
pub async fn list_subprojects(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<SubProject>>> {
    let subprojects = state
        .services
        .subprojects()
        .list(current.actor(), page)
        .await?;
    Ok(ApiResponse::success(subprojects))
}

/// Get a sub-project by id
#[utoipa::path(
    get,
    path = "/api/subprojects/{id}",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sub-project id")),
    responses(
        (status = 200, description = "Sub-project found", body = SubProject),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn get_subproject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<SubProject>> {
    let subproject = state.services.subprojects().get(current.actor(), id).await?;
    Ok(ApiResponse::success(subproject))
}

/// Create a sub-project
#[utoipa::path(
    post,
    path = "/api/subprojects",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    request_body = CreateSubProjectRequest,
    responses(
        (status = 201, description = "Sub-project created", body = SubProject),
        (status = 400, description = "Unknown status or validation error"),
        (status = 404, description = "Parent project not found or out of scope")
    )
)]
pub async fn create_subproject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateSubProjectRequest>,
) -> AppResult<Created<SubProject>> {
    let subproject = state
        .services
        .subprojects()
        .create(
            current.actor(),
            CreateSubProject {
                name: payload.name,
                cost: payload.cost,
                status: payload.status,
                project_id: payload.project_id,
            },
        )
        .await?;
    Ok(Created(subproject))
}

/// Update a sub-project
#[utoipa::path(
    put,
    path = "/api/subprojects/{id}",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sub-project id")),
    request_body = UpdateSubProjectRequest,
    responses(
        (status = 200, description = "Sub-project updated", body = SubProject),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn update_subproject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSubProjectRequest>,
) -> AppResult<ApiResponse<SubProject>> {
    let subproject = state
        .services
        .subprojects()
        .update(
            current.actor(),
            id,
            UpdateSubProject {
                name: payload.name,
                cost: payload.cost,
                status: payload.status,
            },
        )
        .await?;
    Ok(ApiResponse::success(subproject))
}

/// Move a sub-project on its Kanban board
#[utoipa::path(
    put,
    path = "/api/subprojects/{id}/status",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sub-project id")),
    request_body = SetSubProjectStatusRequest,
    responses(
        (status = 200, description = "Sub-project moved", body = SubProject),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn set_subproject_status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SetSubProjectStatusRequest>,
) -> AppResult<ApiResponse<SubProject>> {
    let subproject = state
        .services
        .subprojects()
        .set_status(current.actor(), id, payload.status)
        .await?;
    Ok(ApiResponse::success(subproject))
}

/// Delete a sub-project
#[utoipa::path(
    delete,
    path = "/api/subprojects/{id}",
    tag = "SubProjects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sub-project id")),
    responses(
        (status = 204, description = "Sub-project deleted"),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn delete_subproject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .services
        .subprojects()
        .delete(current.actor(), id)
        .await?;
    Ok(NoContent)
}
