//! Funnel and stage handlers.
//!
//! Stage mutations live under `/api/stages/{id}` because a stage id is
//! unique across funnels.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Funnel, FunnelStage};
use crate::errors::AppResult;
use crate::services::FunnelWithStages;
use crate::types::{ApiResponse, Created, NoContent};

/// Funnel create/rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FunnelRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sales pipeline")]
    pub name: String,
}

/// Stage creation request; without an explicit order the stage is appended
/// after the current last
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStageRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Negotiation")]
    pub name: String,
    pub order: Option<i32>,
}

/// Stage update request; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStageRequest {
    pub name: Option<String>,
    pub order: Option<i32>,
}

/// Funnel routes.
pub fn funnel_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_funnels).post(create_funnel))
        .route(
            "/:id",
            get(get_funnel).put(update_funnel).delete(delete_funnel),
        )
        .route("/:id/stages", post(create_stage))
}

/// Stage routes (flat, stage ids are globally unique).
pub fn stage_routes() -> Router<AppState> {
    Router::new().route("/:id", put(update_stage).delete(delete_stage))
}

/// List funnels with their stages
#[utoipa::path(
    get,
    path = "/api/funnels",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Funnel list", body = [FunnelWithStages]))
)]
pub async fn list_funnels(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FunnelWithStages>>> {
    let funnels = state.services.funnels().list().await?;
    Ok(ApiResponse::success(funnels))
}

/// Get a funnel with its stages
#[utoipa::path(
    get,
    path = "/api/funnels/{id}",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Funnel id")),
    responses(
        (status = 200, description = "Funnel found", body = FunnelWithStages),
        (status = 404, description = "Funnel not found")
    )
)]
pub async fn get_funnel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<FunnelWithStages>> {
    let funnel = state.services.funnels().get(id).await?;
    Ok(ApiResponse::success(funnel))
}

/// Create a funnel
#[utoipa::path(
    post,
    path = "/api/funnels",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    request_body = FunnelRequest,
    responses((status = 201, description = "Funnel created", body = Funnel))
)]
pub async fn create_funnel(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FunnelRequest>,
) -> AppResult<Created<Funnel>> {
    let funnel = state.services.funnels().create(payload.name).await?;
    Ok(Created(funnel))
}

/// Rename a funnel
#[utoipa::path(
    put,
    path = "/api/funnels/{id}",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Funnel id")),
    request_body = FunnelRequest,
    responses(
        (status = 200, description = "Funnel updated", body = Funnel),
        (status = 404, description = "Funnel not found")
    )
)]
pub async fn update_funnel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<FunnelRequest>,
) -> AppResult<ApiResponse<Funnel>> {
    let funnel = state.services.funnels().update(id, payload.name).await?;
    Ok(ApiResponse::success(funnel))
}

/// Delete a funnel
///
/// Its stages are deleted and referencing projects are detached.
#[utoipa::path(
    delete,
    path = "/api/funnels/{id}",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Funnel id")),
    responses(
        (status = 204, description = "Funnel deleted"),
        (status = 404, description = "Funnel not found")
    )
)]
pub async fn delete_funnel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.funnels().delete(id).await?;
    Ok(NoContent)
}

/// Add a stage to a funnel
#[utoipa::path(
    post,
    path = "/api/funnels/{id}/stages",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Funnel id")),
    request_body = CreateStageRequest,
    responses(
        (status = 201, description = "Stage created", body = FunnelStage),
        (status = 404, description = "Funnel not found")
    )
)]
pub async fn create_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateStageRequest>,
) -> AppResult<Created<FunnelStage>> {
    let stage = state
        .services
        .funnels()
        .create_stage(id, payload.name, payload.order)
        .await?;
    Ok(Created(stage))
}

/// Update a stage's name or order
#[utoipa::path(
    put,
    path = "/api/stages/{id}",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stage id")),
    request_body = UpdateStageRequest,
    responses(
        (status = 200, description = "Stage updated", body = FunnelStage),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn update_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStageRequest>,
) -> AppResult<ApiResponse<FunnelStage>> {
    let stage = state
        .services
        .funnels()
        .update_stage(id, payload.name, payload.order)
        .await?;
    Ok(ApiResponse::success(stage))
}

/// Delete a stage
///
/// Projects sitting on the stage keep their funnel but lose the stage
/// reference.
#[utoipa::path(
    delete,
    path = "/api/stages/{id}",
    tag = "Funnels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stage id")),
    responses(
        (status = 204, description = "Stage deleted"),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn delete_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.funnels().delete_stage(id).await?;
    Ok(NoContent)
}
