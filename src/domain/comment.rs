//! Threaded comments on projects and sub-projects.
//!
//! Comments carry text and/or a single file attachment and are scoped by
//! their parent entity's visibility, never independently.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::manager::Actor;

/// Single file attachment on a comment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Attachment {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}

/// Comment domain entity; `parent_id` is a project or sub-project id
/// depending on which collection the comment lives in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Comment {
    pub id: i32,
    pub parent_id: i32,
    /// Nulled when the author's account is deleted; the comment survives.
    pub author_manager_id: Option<i32>,
    pub text: Option<String>,
    #[serde(flatten)]
    pub attachment: Option<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Only the author (or an admin) may edit or delete a comment.
    pub fn can_modify(&self, actor: &Actor) -> bool {
        actor.is_admin() || self.author_manager_id == Some(actor.id)
    }
}

/// Comment creation data
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub parent_id: i32,
    pub author_manager_id: i32,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manager::Role;
    use chrono::Utc;

    fn comment(author: Option<i32>) -> Comment {
        Comment {
            id: 1,
            parent_id: 10,
            author_manager_id: author,
            text: Some("Looks good".into()),
            attachment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn author_or_admin_modifies() {
        let c = comment(Some(3));
        assert!(c.can_modify(&Actor::new(3, Role::Manager)));
        assert!(c.can_modify(&Actor::new(1, Role::Admin)));
        assert!(!c.can_modify(&Actor::new(4, Role::Manager)));
    }

    /// A comment survives its author's deletion and becomes admin-only.
    #[test]
    fn comment_with_deleted_author_locked_to_admins() {
        let c = comment(None);
        assert!(!c.can_modify(&Actor::new(3, Role::Manager)));
        assert!(!c.can_modify(&Actor::new(2, Role::Head)));
        assert!(c.can_modify(&Actor::new(1, Role::Admin)));
    }
}
