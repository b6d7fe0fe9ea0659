//! Task domain entity and its mutation policy.
//!
//! Tasks are the one place where authorization failures surface as an
//! explicit Forbidden rather than NotFound: only the creator (or an admin)
//! may edit descriptive fields, and only the assignee (or an admin) may
//! change the status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::manager::Actor;

/// Task domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Assignee; grants visibility and status-change rights
    pub responsible_manager_id: Option<i32>,
    /// Author; grants visibility and field-edit rights. Nulled when the
    /// creator's account is deleted, leaving the task admin-editable only.
    pub creator_manager_id: Option<i32>,
    pub project_id: Option<i32>,
    pub subproject_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Only the creator (or an admin) may edit descriptive fields.
    pub fn can_edit(&self, actor: &Actor) -> bool {
        actor.is_admin() || self.creator_manager_id == Some(actor.id)
    }

    /// Only the assignee (or an admin) may change the status.
    pub fn can_change_status(&self, actor: &Actor) -> bool {
        actor.is_admin() || self.responsible_manager_id == Some(actor.id)
    }
}

/// Task creation data; the creator is taken from the requester.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub responsible_manager_id: Option<i32>,
    pub project_id: Option<i32>,
    pub subproject_id: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
}

/// Task descriptive-field update; `None` fields are left untouched.
/// Status is deliberately absent - it has its own operation and policy.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub responsible_manager_id: Option<Option<i32>>,
    pub project_id: Option<Option<i32>>,
    pub subproject_id: Option<Option<i32>>,
    pub due_date: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manager::Role;
    use chrono::Utc;

    fn task(creator: Option<i32>, assignee: Option<i32>) -> Task {
        Task {
            id: 1,
            title: "Call the client".into(),
            description: None,
            responsible_manager_id: assignee,
            creator_manager_id: creator,
            project_id: None,
            subproject_id: None,
            due_date: None,
            status: "open".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn creator_edits_assignee_changes_status() {
        let t = task(Some(1), Some(2));
        let creator = Actor::new(1, Role::Manager);
        let assignee = Actor::new(2, Role::Manager);
        let stranger = Actor::new(3, Role::Manager);

        assert!(t.can_edit(&creator));
        assert!(!t.can_edit(&assignee));
        assert!(!t.can_edit(&stranger));

        assert!(t.can_change_status(&assignee));
        assert!(!t.can_change_status(&creator));
        assert!(!t.can_change_status(&stranger));
    }

    #[test]
    fn admin_can_do_both() {
        let t = task(Some(1), Some(2));
        let admin = Actor::new(99, Role::Admin);
        assert!(t.can_edit(&admin));
        assert!(t.can_change_status(&admin));
    }

    #[test]
    fn unassigned_task_status_locked_to_admins() {
        let t = task(Some(1), None);
        assert!(!t.can_change_status(&Actor::new(1, Role::Manager)));
        assert!(t.can_change_status(&Actor::new(1, Role::Admin)));
    }

    /// A task whose creator account was deleted keeps its history but can
    /// only be edited by admins.
    #[test]
    fn orphaned_task_edits_locked_to_admins() {
        let t = task(None, Some(2));
        assert!(!t.can_edit(&Actor::new(2, Role::Manager)));
        assert!(!t.can_edit(&Actor::new(3, Role::Head)));
        assert!(t.can_edit(&Actor::new(99, Role::Admin)));
        // The assignee still drives the status
        assert!(t.can_change_status(&Actor::new(2, Role::Manager)));
    }
}
