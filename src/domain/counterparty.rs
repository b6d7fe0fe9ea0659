//! Counterparty domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Counterparty kind: a private person or a legal entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyKind {
    Individual,
    LegalEntity,
}

impl CounterpartyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterpartyKind::Individual => "individual",
            CounterpartyKind::LegalEntity => "legal_entity",
        }
    }
}

impl From<&str> for CounterpartyKind {
    fn from(s: &str) -> Self {
        match s {
            "legal_entity" => CounterpartyKind::LegalEntity,
            _ => CounterpartyKind::Individual,
        }
    }
}

/// Counterparty domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Counterparty {
    pub id: i32,
    pub name: String,
    pub kind: CounterpartyKind,
    /// Owner field for the visibility scope
    pub responsible_manager_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counterparty creation data
#[derive(Debug, Clone)]
pub struct CreateCounterparty {
    pub name: String,
    pub kind: CounterpartyKind,
    pub responsible_manager_id: Option<i32>,
}

/// Counterparty update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateCounterparty {
    pub name: Option<String>,
    pub kind: Option<CounterpartyKind>,
    pub responsible_manager_id: Option<Option<i32>>,
}
