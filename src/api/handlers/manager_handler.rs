//! Manager account handlers.
//!
//! Mutations are admin-only; the service layer enforces it.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{ManagerResponse, Role, UpdateManager};
use crate::errors::AppResult;
use crate::services::NewManager;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Manager creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManagerRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "anna.schmidt@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Anna")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Schmidt")]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub supervisor_ids: Vec<i32>,
}

/// Manager update request; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateManagerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub supervisor_ids: Option<Vec<i32>>,
}

impl From<UpdateManagerRequest> for UpdateManager {
    fn from(req: UpdateManagerRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            supervisor_ids: req.supervisor_ids,
        }
    }
}

/// Manager routes.
pub fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_managers).post(create_manager))
        .route(
            "/:id",
            get(get_manager).put(update_manager).delete(delete_manager),
        )
}

/// List managers within the requester's scope
#[utoipa::path(
    get,
    path = "/api/managers",
    tag = "Managers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated manager list")
    )
)]
pub async fn list_managers(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<ManagerResponse>>> {
    let managers = state
        .services
        .managers()
        .list(current.actor(), page)
        .await?;
    Ok(ApiResponse::success(managers))
}

/// Get a manager by id
#[utoipa::path(
    get,
    path = "/api/managers/{id}",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 200, description = "Manager found", body = ManagerResponse),
        (status = 404, description = "Manager not found or out of scope")
    )
)]
pub async fn get_manager(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<ManagerResponse>> {
    let manager = state.services.managers().get(current.actor(), id).await?;
    Ok(ApiResponse::success(manager))
}

/// Create a manager account (admin only)
#[utoipa::path(
    post,
    path = "/api/managers",
    tag = "Managers",
    security(("bearer_auth" = [])),
    request_body = CreateManagerRequest,
    responses(
        (status = 201, description = "Manager created", body = ManagerResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_manager(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateManagerRequest>,
) -> AppResult<Created<ManagerResponse>> {
    let manager = state
        .services
        .managers()
        .create(
            current.actor(),
            NewManager {
                email: payload.email,
                password: payload.password,
                first_name: payload.first_name,
                last_name: payload.last_name,
                role: payload.role,
                supervisor_ids: payload.supervisor_ids,
            },
        )
        .await?;
    Ok(Created(manager))
}

/// Update a manager account (admin only)
#[utoipa::path(
    put,
    path = "/api/managers/{id}",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manager id")),
    request_body = UpdateManagerRequest,
    responses(
        (status = 200, description = "Manager updated", body = ManagerResponse),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn update_manager(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateManagerRequest>,
) -> AppResult<ApiResponse<ManagerResponse>> {
    let manager = state
        .services
        .managers()
        .update(current.actor(), id, payload.into())
        .await?;
    Ok(ApiResponse::success(manager))
}

/// Delete a manager account (admin only)
#[utoipa::path(
    delete,
    path = "/api/managers/{id}",
    tag = "Managers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 204, description = "Manager deleted"),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "Manager not found")
    )
)]
pub async fn delete_manager(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.managers().delete(current.actor(), id).await?;
    Ok(NoContent)
}
