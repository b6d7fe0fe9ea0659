//! Product catalog handlers, including per-warehouse stock.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::double_option;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, StockRow, UpdateProduct};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    pub unit_id: Option<i32>,
}

/// Product update request; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "209.90")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub unit_id: Option<Option<i32>>,
}

/// Bulk stock replacement request; applied all-or-nothing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceStockRequest {
    pub stocks: Vec<StockRowRequest>,
}

/// One stock row in the replacement request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockRowRequest {
    pub warehouse_id: i32,
    /// Must not be negative
    #[schema(value_type = String, example = "12.5")]
    pub quantity: Decimal,
}

impl From<StockRowRequest> for StockRow {
    fn from(req: StockRowRequest) -> Self {
        Self {
            warehouse_id: req.warehouse_id,
            quantity: req.quantity,
        }
    }
}

/// Product routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", get(get_stock).post(replace_stock))
}

/// List products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated product list")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<Product>>> {
    let products = state.services.products().list(page).await?;
    Ok(ApiResponse::success(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.services.products().get(id).await?;
    Ok(ApiResponse::success(product))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<Product>> {
    let product = state
        .services
        .products()
        .create(CreateProduct {
            name: payload.name,
            price: payload.price,
            unit_id: payload.unit_id,
        })
        .await?;
    Ok(Created(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<ApiResponse<Product>> {
    let product = state
        .services
        .products()
        .update(
            id,
            UpdateProduct {
                name: payload.name,
                price: payload.price,
                unit_id: payload.unit_id,
            },
        )
        .await?;
    Ok(ApiResponse::success(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.products().delete(id).await?;
    Ok(NoContent)
}

/// Get a product's stock rows
#[utoipa::path(
    get,
    path = "/api/products/{id}/stock",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Stock rows", body = [StockRow]),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Vec<StockRow>>> {
    let rows = state.services.products().stocks(id).await?;
    Ok(ApiResponse::success(rows))
}

/// Replace a product's stock rows atomically
#[utoipa::path(
    post,
    path = "/api/products/{id}/stock",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    request_body = ReplaceStockRequest,
    responses(
        (status = 200, description = "Stock replaced", body = [StockRow]),
        (status = 400, description = "Negative quantity"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn replace_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReplaceStockRequest>,
) -> AppResult<ApiResponse<Vec<StockRow>>> {
    let rows = payload.stocks.into_iter().map(StockRow::from).collect();
    let rows = state.services.products().replace_stock(id, rows).await?;
    Ok(ApiResponse::success(rows))
}
