//! Project domain entity, its service list and derived aggregate cost.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Increment applied when the same service is added to a project again.
///
/// Repeated additions of a service are coalesced into a fractional quantity
/// in tenths (first add = 1.0, each duplicate add = +0.1). Preserved for
/// compatibility with existing stored data.
pub const DUPLICATE_SERVICE_INCREMENT: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Quantity stored on the first addition of a service to a project.
pub const INITIAL_SERVICE_QUANTITY: Decimal = Decimal::ONE;

/// One entry in a project's aggregated service list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectServiceLine {
    pub service_id: i32,
    pub service_name: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
    /// Tenths convention: 1.0 on first add, +0.1 per duplicate add
    #[schema(value_type = String, example = "1.2")]
    pub quantity: Decimal,
}

/// Project domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "25000.00")]
    pub forecast_amount: Decimal,
    pub counterparty_id: Option<i32>,
    /// Primary owner for the visibility scope
    pub main_responsible_manager_id: Option<i32>,
    /// Co-owners (many-to-many); any of them grants visibility
    pub secondary_responsible_manager_ids: Vec<i32>,
    /// Current pipeline position
    pub funnel_id: Option<i32>,
    pub funnel_stage_id: Option<i32>,
    pub services: Vec<ProjectServiceLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived aggregate cost of a project: its service list plus the costs of
/// its sub-projects. Computed at read time, never stored.
pub fn project_cost(services: &[ProjectServiceLine], subproject_costs: &[Decimal]) -> Decimal {
    let service_total: Decimal = services.iter().map(|l| l.price * l.quantity).sum();
    let subproject_total: Decimal = subproject_costs.iter().copied().sum();
    service_total + subproject_total
}

/// Next quantity for adding `service_id`-like entry given the current one.
///
/// `None` means the service is not on the list yet.
pub fn next_service_quantity(current: Option<Decimal>) -> Decimal {
    match current {
        None => INITIAL_SERVICE_QUANTITY,
        Some(q) => q + DUPLICATE_SERVICE_INCREMENT,
    }
}

/// Project creation data
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub forecast_amount: Decimal,
    pub counterparty_id: Option<i32>,
    pub main_responsible_manager_id: Option<i32>,
    pub secondary_responsible_manager_ids: Vec<i32>,
    pub funnel_id: Option<i32>,
    pub funnel_stage_id: Option<i32>,
}

/// Project update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub forecast_amount: Option<Decimal>,
    pub counterparty_id: Option<Option<i32>>,
    pub main_responsible_manager_id: Option<Option<i32>>,
    pub secondary_responsible_manager_ids: Option<Vec<i32>>,
    pub funnel_id: Option<Option<i32>>,
    pub funnel_stage_id: Option<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn first_add_stores_one() {
        assert_eq!(next_service_quantity(None), dec("1"));
    }

    #[test]
    fn duplicate_add_increments_by_a_tenth() {
        assert_eq!(next_service_quantity(Some(dec("1"))), dec("1.1"));
        assert_eq!(next_service_quantity(Some(dec("1.1"))), dec("1.2"));
    }

    #[test]
    fn cost_sums_services_and_subprojects() {
        let services = vec![ProjectServiceLine {
            service_id: 1,
            service_name: "Audit".into(),
            price: dec("1000.00"),
            quantity: dec("1.2"),
        }];
        let subs = vec![dec("300.00"), dec("200.00")];

        assert_eq!(project_cost(&services, &subs), dec("1700.00"));
    }

    #[test]
    fn cost_of_empty_project_is_zero() {
        assert_eq!(project_cost(&[], &[]), Decimal::ZERO);
    }
}
