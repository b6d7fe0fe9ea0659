//! Sale domain entity and derived total computation.
//!
//! A sale's total price is never stored; it is derived from the line items at
//! read time so the client can never desync it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// A product line on a sale: a product sold in some quantity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleProductLine {
    pub product_id: i32,
    pub product_name: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    #[schema(value_type = String, example = "3")]
    pub quantity: Decimal,
}

/// A service line on a sale. Services carry no quantity on simple sales.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleServiceLine {
    pub service_id: i32,
    pub service_name: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
}

/// Sale domain entity with resolved line items.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Sale {
    pub id: i32,
    pub counterparty_id: i32,
    /// Owner field for the visibility scope
    pub responsible_manager_id: Option<i32>,
    pub sale_date: NaiveDate,
    pub status: String,
    pub deferred_payment_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
    pub products: Vec<SaleProductLine>,
    pub services: Vec<SaleServiceLine>,
    /// Derived, never stored
    #[schema(value_type = String, example = "1099.70")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derive a sale's total from its line items.
///
/// `total = Σ(product.price × quantity) + Σ(service.price)`
pub fn sale_total(products: &[SaleProductLine], services: &[SaleServiceLine]) -> Decimal {
    let product_total: Decimal = products.iter().map(|l| l.price * l.quantity).sum();
    let service_total: Decimal = services.iter().map(|l| l.price).sum();
    product_total + service_total
}

/// Sale creation data
#[derive(Debug, Clone)]
pub struct CreateSale {
    pub counterparty_id: i32,
    pub responsible_manager_id: Option<i32>,
    pub sale_date: NaiveDate,
    pub status: String,
    pub deferred_payment_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
    pub products: Vec<(i32, Decimal)>,
    pub services: Vec<i32>,
}

/// Sale update data; `None` fields are left untouched. Line items, when
/// present, replace the stored ones wholesale.
#[derive(Debug, Clone, Default)]
pub struct UpdateSale {
    pub counterparty_id: Option<i32>,
    pub responsible_manager_id: Option<Option<i32>>,
    pub sale_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub deferred_payment_date: Option<Option<NaiveDate>>,
    pub project_id: Option<Option<i32>>,
    pub products: Option<Vec<(i32, Decimal)>>,
    pub services: Option<Vec<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(price: &str, qty: &str) -> SaleProductLine {
        SaleProductLine {
            product_id: 1,
            product_name: "Widget".into(),
            price: price.parse().unwrap(),
            quantity: qty.parse().unwrap(),
        }
    }

    fn service(price: &str) -> SaleServiceLine {
        SaleServiceLine {
            service_id: 1,
            service_name: "Installation".into(),
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn total_sums_products_and_services() {
        let products = vec![product("199.90", "3"), product("10.00", "0.5")];
        let services = vec![service("500.00")];

        assert_eq!(sale_total(&products, &services), dec("1104.70"));
    }

    #[test]
    fn total_of_empty_sale_is_zero() {
        assert_eq!(sale_total(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn total_is_idempotent() {
        let products = vec![product("42.42", "7")];
        let services = vec![service("1.01")];

        let first = sale_total(&products, &services);
        let second = sale_total(&products, &services);
        assert_eq!(first, second);
    }

    #[test]
    fn adding_then_removing_a_line_restores_total() {
        let mut products = vec![product("100.00", "2")];
        let services = vec![service("50.00")];
        let original = sale_total(&products, &services);

        products.push(product("9.99", "1"));
        assert_ne!(sale_total(&products, &services), original);

        products.pop();
        assert_eq!(sale_total(&products, &services), original);
    }
}
