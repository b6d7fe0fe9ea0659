//! Project handlers: CRUD, pipeline moves, the service list and cost.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::double_option;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{CreateProject, Project, UpdateProject};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Project creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Rollout")]
    pub name: String,
    #[schema(value_type = String, example = "25000.00")]
    pub forecast_amount: Decimal,
    pub counterparty_id: Option<i32>,
    /// Defaults to the requester for non-admins when omitted
    pub main_responsible_manager_id: Option<i32>,
    #[serde(default)]
    pub secondary_responsible_manager_ids: Vec<i32>,
    pub funnel_id: Option<i32>,
    /// When set, the funnel follows the stage's funnel
    pub funnel_stage_id: Option<i32>,
}

/// Project update request; omitted fields are left untouched, explicit
/// `null` clears nullable fields
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "30000.00")]
    pub forecast_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub counterparty_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub main_responsible_manager_id: Option<Option<i32>>,
    pub secondary_responsible_manager_ids: Option<Vec<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub funnel_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub funnel_stage_id: Option<Option<i32>>,
}

/// Pipeline move request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetStageRequest {
    pub funnel_stage_id: i32,
}

/// Request to add a service to the project's aggregated list.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddServiceRequest {
    pub service_id: i32,
}

/// Derived aggregate cost of a project.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectCostResponse {
    #[schema(value_type = String, example = "1600.00")]
    pub cost: Decimal,
}

/// Project routes.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/stage", put(set_stage))
        .route("/:id/services", post(add_service))
        .route("/:id/services/:service_id", axum::routing::delete(remove_service))
        .route("/:id/cost", get(project_cost))
}

/// List projects within the requester's scope
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated project list"))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<Project>>> {
    let projects = state.services.projects().list(current.actor(), page).await?;
    Ok(ApiResponse::success(projects))
}

/// Get a project by id
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Project>> {
    let project = state.services.projects().get(current.actor(), id).await?;
    Ok(ApiResponse::success(project))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Unknown funnel stage or validation error")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> AppResult<Created<Project>> {
    let project = state
        .services
        .projects()
        .create(
            current.actor(),
            CreateProject {
                name: payload.name,
                forecast_amount: payload.forecast_amount,
                counterparty_id: payload.counterparty_id,
                main_responsible_manager_id: payload.main_responsible_manager_id,
                secondary_responsible_manager_ids: payload.secondary_responsible_manager_ids,
                funnel_id: payload.funnel_id,
                funnel_stage_id: payload.funnel_stage_id,
            },
        )
        .await?;
    Ok(Created(project))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> AppResult<ApiResponse<Project>> {
    let project = state
        .services
        .projects()
        .update(
            current.actor(),
            id,
            UpdateProject {
                name: payload.name,
                forecast_amount: payload.forecast_amount,
                counterparty_id: payload.counterparty_id,
                main_responsible_manager_id: payload.main_responsible_manager_id,
                secondary_responsible_manager_ids: payload.secondary_responsible_manager_ids,
                funnel_id: payload.funnel_id,
                funnel_stage_id: payload.funnel_stage_id,
            },
        )
        .await?;
    Ok(ApiResponse::success(project))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.projects().delete(current.actor(), id).await?;
    Ok(NoContent)
}

/// Move a project to a funnel stage
///
/// The project's funnel follows the stage's funnel, so a cross-funnel move
/// stays consistent.
#[utoipa::path(
    put,
    path = "/api/projects/{id}/stage",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    request_body = SetStageRequest,
    responses(
        (status = 200, description = "Project moved", body = Project),
        (status = 404, description = "Project or stage not found")
    )
)]
pub async fn set_stage(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SetStageRequest>,
) -> AppResult<ApiResponse<Project>> {
    let project = state
        .services
        .projects()
        .set_stage(current.actor(), id, payload.funnel_stage_id)
        .await?;
    Ok(ApiResponse::success(project))
}

/// Add a service to the project's aggregated list
#[utoipa::path(
    post,
    path = "/api/projects/{id}/services",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    request_body = AddServiceRequest,
    responses(
        (status = 200, description = "Service added", body = Project),
        (status = 400, description = "Unknown service"),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn add_service(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AddServiceRequest>,
) -> AppResult<ApiResponse<Project>> {
    let project = state
        .services
        .projects()
        .add_service(current.actor(), id, payload.service_id)
        .await?;
    Ok(ApiResponse::success(project))
}

/// Remove a service from the project's aggregated list
#[utoipa::path(
    delete,
    path = "/api/projects/{id}/services/{service_id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Project id"),
        ("service_id" = i32, Path, description = "Service id")
    ),
    responses(
        (status = 200, description = "Service removed", body = Project),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn remove_service(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path((id, service_id)): Path<(i32, i32)>,
) -> AppResult<ApiResponse<Project>> {
    let project = state
        .services
        .projects()
        .remove_service(current.actor(), id, service_id)
        .await?;
    Ok(ApiResponse::success(project))
}

/// Get the project's derived aggregate cost
#[utoipa::path(
    get,
    path = "/api/projects/{id}/cost",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Derived cost", body = ProjectCostResponse),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn project_cost(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<ProjectCostResponse>> {
    let cost = state.services.projects().cost(current.actor(), id).await?;
    Ok(ApiResponse::success(ProjectCostResponse { cost }))
}
