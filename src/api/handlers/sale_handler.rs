//! Sale handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::double_option;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{CreateSale, Sale, UpdateSale};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// One product line in a sale request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaleProductRequest {
    pub product_id: i32,
    #[schema(value_type = String, example = "3")]
    pub quantity: Decimal,
}

/// Sale creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSaleRequest {
    pub counterparty_id: i32,
    /// Defaults to the requester for non-admins when omitted
    pub responsible_manager_id: Option<i32>,
    pub sale_date: NaiveDate,
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "new")]
    pub status: String,
    pub deferred_payment_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
    #[serde(default)]
    pub products: Vec<SaleProductRequest>,
    /// Service ids sold on this sale
    #[serde(default)]
    pub services: Vec<i32>,
}

/// Sale update request; omitted fields are left untouched, explicit `null`
/// clears nullable fields. Line items, when present, replace the stored
/// ones wholesale.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSaleRequest {
    pub counterparty_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub responsible_manager_id: Option<Option<i32>>,
    pub sale_date: Option<NaiveDate>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub deferred_payment_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub project_id: Option<Option<i32>>,
    pub products: Option<Vec<SaleProductRequest>>,
    pub services: Option<Vec<i32>>,
}

fn product_pairs(lines: Vec<SaleProductRequest>) -> Vec<(i32, Decimal)> {
    lines.into_iter().map(|l| (l.product_id, l.quantity)).collect()
}

/// Sale routes.
pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
}

/// List sales within the requester's scope
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated sale list"))
)]
pub async fn list_sales(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<Sale>>> {
    let sales = state.services.sales().list(current.actor(), page).await?;
    Ok(ApiResponse::success(sales))
}

/// Get a sale by id
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale found", body = Sale),
        (status = 404, description = "Sale not found or out of scope")
    )
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Sale>> {
    let sale = state.services.sales().get(current.actor(), id).await?;
    Ok(ApiResponse::success(sale))
}

/// Create a sale
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale created", body = Sale),
        (status = 400, description = "Unknown counterparty or validation error")
    )
)]
pub async fn create_sale(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    ValidatedJson(payload): ValidatedJson<CreateSaleRequest>,
) -> AppResult<Created<Sale>> {
    let sale = state
        .services
        .sales()
        .create(
            current.actor(),
            CreateSale {
                counterparty_id: payload.counterparty_id,
                responsible_manager_id: payload.responsible_manager_id,
                sale_date: payload.sale_date,
                status: payload.status,
                deferred_payment_date: payload.deferred_payment_date,
                project_id: payload.project_id,
                products: product_pairs(payload.products),
                services: payload.services,
            },
        )
        .await?;
    Ok(Created(sale))
}

/// Update a sale
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sale id")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Sale updated", body = Sale),
        (status = 404, description = "Sale not found or out of scope")
    )
)]
pub async fn update_sale(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSaleRequest>,
) -> AppResult<ApiResponse<Sale>> {
    let sale = state
        .services
        .sales()
        .update(
            current.actor(),
            id,
            UpdateSale {
                counterparty_id: payload.counterparty_id,
                responsible_manager_id: payload.responsible_manager_id,
                sale_date: payload.sale_date,
                status: payload.status,
                deferred_payment_date: payload.deferred_payment_date,
                project_id: payload.project_id,
                products: payload.products.map(product_pairs),
                services: payload.services,
            },
        )
        .await?;
    Ok(ApiResponse::success(sale))
}

/// Delete a sale
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 404, description = "Sale not found or out of scope")
    )
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.sales().delete(current.actor(), id).await?;
    Ok(NoContent)
}
