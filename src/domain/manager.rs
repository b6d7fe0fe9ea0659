//! Manager domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_HEAD, ROLE_MANAGER};

/// Manager roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Head,
    Manager,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => Role::Admin,
            ROLE_HEAD => Role::Head,
            _ => Role::Manager,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", ROLE_ADMIN),
            Role::Head => write!(f, "{}", ROLE_HEAD),
            Role::Manager => write!(f, "{}", ROLE_MANAGER),
        }
    }
}

/// The authenticated requester, as seen by the service layer.
///
/// Built from verified JWT claims by the auth middleware; every scoped
/// operation takes one of these.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Manager domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Manager {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Ids of this manager's supervisors (many-to-many, not a tree)
    pub supervisor_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manager {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Manager response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManagerResponse {
    pub id: i32,
    /// Manager email address
    #[schema(example = "manager@example.com")]
    pub email: String,
    #[schema(example = "Anna")]
    pub first_name: String,
    #[schema(example = "Schmidt")]
    pub last_name: String,
    /// Manager role
    #[schema(example = "manager")]
    pub role: String,
    pub supervisor_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Manager> for ManagerResponse {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            email: manager.email,
            first_name: manager.first_name,
            last_name: manager.last_name,
            role: manager.role.to_string(),
            supervisor_ids: manager.supervisor_ids,
            created_at: manager.created_at,
        }
    }
}

/// Manager creation data (admin only)
#[derive(Debug, Clone)]
pub struct CreateManager {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub supervisor_ids: Vec<i32>,
}

/// Manager update data; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateManager {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub supervisor_ids: Option<Vec<i32>>,
}
