//! Sub-project domain entity and its status dictionary.
//!
//! The sub-project Kanban is keyed by a free-text status label matched
//! against the status dictionary by name, not by a stage foreign key. It is
//! a structurally similar but independent mechanism from the project funnel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Status dictionary entry for sub-project boards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubProjectStatus {
    pub id: i32,
    pub name: String,
}

/// Sub-project domain entity; belongs to exactly one project and inherits
/// its visibility from it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubProject {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "300.00")]
    pub cost: Decimal,
    /// Free-text label expected to match a status dictionary name
    pub status: String,
    pub project_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sub-project creation data
#[derive(Debug, Clone)]
pub struct CreateSubProject {
    pub name: String,
    pub cost: Decimal,
    pub status: String,
    pub project_id: i32,
}

/// Sub-project update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateSubProject {
    pub name: Option<String>,
    pub cost: Option<Decimal>,
    pub status: Option<String>,
}
