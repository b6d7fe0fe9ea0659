//! Counterparty handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::double_option;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{Counterparty, CounterpartyKind, CreateCounterparty, UpdateCounterparty};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Counterparty creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCounterpartyRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Acme GmbH")]
    pub name: String,
    pub kind: CounterpartyKind,
    /// Defaults to the requester for non-admins when omitted
    pub responsible_manager_id: Option<i32>,
}

/// Counterparty update request; omitted fields are left untouched,
/// `responsible_manager_id: null` clears the owner
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCounterpartyRequest {
    pub name: Option<String>,
    pub kind: Option<CounterpartyKind>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub responsible_manager_id: Option<Option<i32>>,
}

/// Counterparty routes.
pub fn counterparty_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_counterparties).post(create_counterparty))
        .route(
            "/:id",
            get(get_counterparty)
                .put(update_counterparty)
                .delete(delete_counterparty),
        )
}

/// List counterparties within the requester's scope
#[utoipa::path(
    get,
    path = "/api/counterparties",
    tag = "Counterparties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated counterparty list")
    )
)]
pub async fn list_counterparties(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<Counterparty>>> {
    let counterparties = state
        .services
        .counterparties()
        .list(current.actor(), page)
        .await?;
    Ok(ApiResponse::success(counterparties))
}

/// Get a counterparty by id
#[utoipa::path(
    get,
    path = "/api/counterparties/{id}",
    tag = "Counterparties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Counterparty id")),
    responses(
        (status = 200, description = "Counterparty found", body = Counterparty),
        (status = 404, description = "Counterparty not found or out of scope")
    )
)]
pub async fn get_counterparty(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Counterparty>> {
    let counterparty = state
        .services
        .counterparties()
        .get(current.actor(), id)
        .await?;
    Ok(ApiResponse::success(counterparty))
}

/// Create a counterparty
#[utoipa::path(
    post,
    path = "/api/counterparties",
    tag = "Counterparties",
    security(("bearer_auth" = [])),
    request_body = CreateCounterpartyRequest,
    responses(
        (status = 201, description = "Counterparty created", body = Counterparty),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_counterparty(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateCounterpartyRequest>,
) -> AppResult<Created<Counterparty>> {
    let counterparty = state
        .services
        .counterparties()
        .create(
            current.actor(),
            CreateCounterparty {
                name: payload.name,
                kind: payload.kind,
                responsible_manager_id: payload.responsible_manager_id,
            },
        )
        .await?;
    Ok(Created(counterparty))
}

/// Update a counterparty
#[utoipa::path(
    put,
    path = "/api/counterparties/{id}",
    tag = "Counterparties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Counterparty id")),
    request_body = UpdateCounterpartyRequest,
    responses(
        (status = 200, description = "Counterparty updated", body = Counterparty),
        (status = 404, description = "Counterparty not found or out of scope")
    )
)]
pub async fn update_counterparty(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCounterpartyRequest>,
) -> AppResult<ApiResponse<Counterparty>> {
    let counterparty = state
        .services
        .counterparties()
        .update(
            current.actor(),
            id,
            UpdateCounterparty {
                name: payload.name,
                kind: payload.kind,
                responsible_manager_id: payload.responsible_manager_id,
            },
        )
        .await?;
    Ok(ApiResponse::success(counterparty))
}

/// Delete a counterparty
#[utoipa::path(
    delete,
    path = "/api/counterparties/{id}",
    tag = "Counterparties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Counterparty id")),
    responses(
        (status = 204, description = "Counterparty deleted"),
        (status = 404, description = "Counterparty not found or out of scope")
    )
)]
pub async fn delete_counterparty(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .services
        .counterparties()
        .delete(current.actor(), id)
        .await?;
    Ok(NoContent)
}
