//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Actor, Role};
use crate::errors::AppError;

/// Authenticated manager extracted from the JWT token.
#[derive(Clone, Debug)]
pub struct CurrentManager {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

impl CurrentManager {
    /// The service-layer view of this requester.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentManager into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.services.auth().verify_token(token)?;

    let current_manager = CurrentManager {
        id: claims.sub,
        email: claims.email,
        role: Role::from(claims.role.as_str()),
    };

    request.extensions_mut().insert(current_manager);

    Ok(next.run(request).await)
}
