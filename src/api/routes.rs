//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, comment_routes, counterparty_routes, funnel_routes, manager_routes,
    me_routes, product_routes, project_routes, sale_routes, service_routes, stage_routes,
    subproject_routes, subproject_status_routes, task_routes, unit_routes, upload_routes,
    warehouse_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Headroom on top of the configured upload cap for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Everything under /api except login requires a verified token
    let protected = Router::new()
        .nest("/api/auth", me_routes())
        .nest("/api/managers", manager_routes())
        .nest("/api/counterparties", counterparty_routes())
        .nest("/api/products", product_routes())
        .nest("/api/services", service_routes())
        .nest("/api/units", unit_routes())
        .nest("/api/warehouses", warehouse_routes())
        .nest("/api/subproject-statuses", subproject_status_routes())
        .nest("/api/sales", sale_routes())
        .nest("/api/projects", project_routes())
        .nest("/api/subprojects", subproject_routes())
        .nest("/api/comments", comment_routes())
        .nest("/api/tasks", task_routes())
        .nest("/api/funnels", funnel_routes())
        .nest("/api/stages", stage_routes())
        .nest(
            "/api/upload",
            upload_routes().layer(DefaultBodyLimit::max(
                state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public authentication routes
        .nest("/api/auth", auth_routes())
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "CRM backend"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = db_status.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
        },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
