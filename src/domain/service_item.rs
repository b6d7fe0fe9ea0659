//! Service catalog entry (a sellable service, as opposed to a product).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Service domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceItem {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service creation data
#[derive(Debug, Clone)]
pub struct CreateServiceItem {
    pub name: String,
    pub price: Decimal,
}

/// Service update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceItem {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}
