//! Authentication handlers.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::ManagerResponse;
use crate::errors::AppResult;
use crate::services::LoginResponse;
use crate::types::ApiResponse;

/// Manager login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Manager email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "manager@example.com")]
    pub email: String,
    /// Manager password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Public authentication routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes that need an authenticated requester.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let response = state
        .services
        .auth()
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::success(response))
}

/// Get the authenticated manager's own record
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current manager", body = ManagerResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
) -> AppResult<ApiResponse<ManagerResponse>> {
    let manager = state.services.auth().current_manager(current.id).await?;
    Ok(ApiResponse::success(manager))
}
