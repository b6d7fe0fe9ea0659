//! Integration tests for API building blocks.
//!
//! These tests exercise the crate from the outside: the auth service trait
//! with a hand-written stub, the response envelope, and the domain rules a
//! client observes through the API.

use async_trait::async_trait;
use chrono::Utc;

use crm_backend::domain::{ManagerResponse, Role};
use crm_backend::errors::{AppError, AppResult};
use crm_backend::services::{AuthService, Claims, LoginResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Stub auth service with a fixed token.
struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn login(&self, email: String, _password: String) -> AppResult<LoginResponse> {
        Ok(LoginResponse {
            manager: ManagerResponse {
                id: 1,
                email,
                first_name: "Test".to_string(),
                last_name: "Manager".to_string(),
                role: "manager".to_string(),
                supervisor_ids: vec![],
                created_at: Utc::now(),
            },
            token: "stub-token".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: 1,
                email: "test@example.com".to_string(),
                role: "manager".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }

    async fn current_manager(&self, manager_id: i32) -> AppResult<ManagerResponse> {
        Ok(ManagerResponse {
            id: manager_id,
            email: "test@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "Manager".to_string(),
            role: "manager".to_string(),
            supervisor_ids: vec![],
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Auth Service Contract Tests
// =============================================================================

#[tokio::test]
async fn valid_token_yields_claims() {
    let auth = StubAuthService;
    let claims = auth.verify_token("valid-test-token").unwrap();
    assert_eq!(claims.sub, 1);
    assert_eq!(claims.role, "manager");
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let auth = StubAuthService;
    let result = auth.verify_token("garbage");
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn login_returns_manager_and_token() {
    let auth = StubAuthService;
    let response = auth
        .login("test@example.com".to_string(), "password".to_string())
        .await
        .unwrap();
    assert_eq!(response.manager.email, "test@example.com");
    assert!(!response.token.is_empty());
    assert!(response.expires_in > 0);
}

// =============================================================================
// Response Envelope Tests
// =============================================================================

#[tokio::test]
async fn api_response_wraps_data() {
    use crm_backend::types::ApiResponse;

    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn api_response_message_only() {
    use crm_backend::types::ApiResponse;

    let response: ApiResponse<()> = ApiResponse::message("Done");
    assert!(response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message.unwrap(), "Done");
}

#[tokio::test]
async fn pagination_meta_computes_total_pages() {
    use crm_backend::types::{Paginated, PaginationParams};

    let page = PaginationParams::default();
    let paginated = Paginated::new(vec![1, 2, 3], page, 45);
    assert_eq!(paginated.pagination.page, 1);
    assert_eq!(paginated.pagination.limit, 20);
    assert_eq!(paginated.pagination.total, 45);
    assert_eq!(paginated.pagination.total_pages, 3);
}

// =============================================================================
// Role Tests
// =============================================================================

#[tokio::test]
async fn role_round_trips_through_strings() {
    assert_eq!(Role::Admin.to_string(), "admin");
    assert_eq!(Role::Head.to_string(), "head");
    assert_eq!(Role::Manager.to_string(), "manager");

    assert_eq!(Role::from("admin"), Role::Admin);
    assert_eq!(Role::from("head"), Role::Head);
    // Unknown values default to the least privileged role
    assert_eq!(Role::from("anything-else"), Role::Manager);
}
