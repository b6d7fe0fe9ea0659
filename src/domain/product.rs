//! Product catalog: products, measurement units, warehouses and stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Measurement unit dictionary entry (pcs, kg, m, ...)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Unit {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
}

/// Warehouse dictionary entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
}

/// Product domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    pub unit_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One stock row: quantity of a product held at a warehouse.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockRow {
    pub warehouse_id: i32,
    #[schema(value_type = String, example = "12.5")]
    pub quantity: Decimal,
}

/// Product creation data
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub unit_id: Option<i32>,
}

/// Product update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub unit_id: Option<Option<i32>>,
}
