//! Dictionary handlers: sellable services, units, warehouses and the
//! sub-project status dictionary.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    CreateServiceItem, ServiceItem, SubProjectStatus, Unit, UpdateServiceItem, Warehouse,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Service creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Installation")]
    pub name: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
}

/// Service update request; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, example = "550.00")]
    pub price: Option<Decimal>,
}

/// Unit creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUnitRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Kilogram")]
    pub name: String,
    #[validate(length(min = 1, message = "Abbreviation is required"))]
    #[schema(example = "kg")]
    pub abbreviation: String,
}

/// Unit update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUnitRequest {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

/// Warehouse create/rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WarehouseRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Main warehouse")]
    pub name: String,
}

/// Sub-project status create/rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubProjectStatusRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "in_progress")]
    pub name: String,
}

/// Sellable service routes.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
}

/// Measurement unit routes.
pub fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/:id", get(get_unit).put(update_unit).delete(delete_unit))
}

/// Warehouse routes.
pub fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
}

/// Sub-project status dictionary routes.
pub fn subproject_status_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route("/:id", axum::routing::put(update_status).delete(delete_status))
}

/// List sellable services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Paginated service list"))
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<ServiceItem>>> {
    let services = state.services.catalog().list_service_items(page).await?;
    Ok(ApiResponse::success(services))
}

/// Get a sellable service by id
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service found", body = ServiceItem),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<ServiceItem>> {
    let service = state.services.catalog().get_service_item(id).await?;
    Ok(ApiResponse::success(service))
}

/// Create a sellable service
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses((status = 201, description = "Service created", body = ServiceItem))
)]
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<Created<ServiceItem>> {
    let service = state
        .services
        .catalog()
        .create_service_item(CreateServiceItem {
            name: payload.name,
            price: payload.price,
        })
        .await?;
    Ok(Created(service))
}

/// Update a sellable service
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service id")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceItem),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> AppResult<ApiResponse<ServiceItem>> {
    let service = state
        .services
        .catalog()
        .update_service_item(
            id,
            UpdateServiceItem {
                name: payload.name,
                price: payload.price,
            },
        )
        .await?;
    Ok(ApiResponse::success(service))
}

/// Delete a sellable service
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.catalog().delete_service_item(id).await?;
    Ok(NoContent)
}

/// List measurement units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unit list", body = [Unit]))
)]
pub async fn list_units(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Unit>>> {
    let units = state.services.catalog().list_units().await?;
    Ok(ApiResponse::success(units))
}

/// Get a measurement unit by id
#[utoipa::path(
    get,
    path = "/api/units/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit id")),
    responses(
        (status = 200, description = "Unit found", body = Unit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Unit>> {
    let unit = state.services.catalog().get_unit(id).await?;
    Ok(ApiResponse::success(unit))
}

/// Create a measurement unit
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateUnitRequest,
    responses((status = 201, description = "Unit created", body = Unit))
)]
pub async fn create_unit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUnitRequest>,
) -> AppResult<Created<Unit>> {
    let unit = state
        .services
        .catalog()
        .create_unit(payload.name, payload.abbreviation)
        .await?;
    Ok(Created(unit))
}

/// Update a measurement unit
#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit id")),
    request_body = UpdateUnitRequest,
    responses(
        (status = 200, description = "Unit updated", body = Unit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUnitRequest>,
) -> AppResult<ApiResponse<Unit>> {
    let unit = state
        .services
        .catalog()
        .update_unit(id, payload.name, payload.abbreviation)
        .await?;
    Ok(ApiResponse::success(unit))
}

/// Delete a measurement unit
#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit id")),
    responses(
        (status = 204, description = "Unit deleted"),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.catalog().delete_unit(id).await?;
    Ok(NoContent)
}

/// List warehouses
#[utoipa::path(
    get,
    path = "/api/warehouses",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Warehouse list", body = [Warehouse]))
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Warehouse>>> {
    let warehouses = state.services.catalog().list_warehouses().await?;
    Ok(ApiResponse::success(warehouses))
}

/// Get a warehouse by id
#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warehouse id")),
    responses(
        (status = 200, description = "Warehouse found", body = Warehouse),
        (status = 404, description = "Warehouse not found")
    )
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<Warehouse>> {
    let warehouse = state.services.catalog().get_warehouse(id).await?;
    Ok(ApiResponse::success(warehouse))
}

/// Create a warehouse
#[utoipa::path(
    post,
    path = "/api/warehouses",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = WarehouseRequest,
    responses((status = 201, description = "Warehouse created", body = Warehouse))
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WarehouseRequest>,
) -> AppResult<Created<Warehouse>> {
    let warehouse = state.services.catalog().create_warehouse(payload.name).await?;
    Ok(Created(warehouse))
}

/// Rename a warehouse
#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warehouse id")),
    request_body = WarehouseRequest,
    responses(
        (status = 200, description = "Warehouse updated", body = Warehouse),
        (status = 404, description = "Warehouse not found")
    )
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<WarehouseRequest>,
) -> AppResult<ApiResponse<Warehouse>> {
    let warehouse = state
        .services
        .catalog()
        .update_warehouse(id, payload.name)
        .await?;
    Ok(ApiResponse::success(warehouse))
}

/// Delete a warehouse
#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warehouse id")),
    responses(
        (status = 204, description = "Warehouse deleted"),
        (status = 404, description = "Warehouse not found")
    )
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.catalog().delete_warehouse(id).await?;
    Ok(NoContent)
}

/// List sub-project statuses
#[utoipa::path(
    get,
    path = "/api/subproject-statuses",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Status list", body = [SubProjectStatus]))
)]
pub async fn list_statuses(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SubProjectStatus>>> {
    let statuses = state.services.catalog().list_subproject_statuses().await?;
    Ok(ApiResponse::success(statuses))
}

/// Create a sub-project status
#[utoipa::path(
    post,
    path = "/api/subproject-statuses",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    request_body = SubProjectStatusRequest,
    responses(
        (status = 201, description = "Status created", body = SubProjectStatus),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_status(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubProjectStatusRequest>,
) -> AppResult<Created<SubProjectStatus>> {
    let status = state
        .services
        .catalog()
        .create_subproject_status(payload.name)
        .await?;
    Ok(Created(status))
}

/// Rename a sub-project status
#[utoipa::path(
    put,
    path = "/api/subproject-statuses/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Status id")),
    request_body = SubProjectStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = SubProjectStatus),
        (status = 404, description = "Status not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SubProjectStatusRequest>,
) -> AppResult<ApiResponse<SubProjectStatus>> {
    let status = state
        .services
        .catalog()
        .update_subproject_status(id, payload.name)
        .await?;
    Ok(ApiResponse::success(status))
}

/// Delete a sub-project status
#[utoipa::path(
    delete,
    path = "/api/subproject-statuses/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Status id")),
    responses(
        (status = 204, description = "Status deleted"),
        (status = 404, description = "Status not found")
    )
)]
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.catalog().delete_subproject_status(id).await?;
    Ok(NoContent)
}
