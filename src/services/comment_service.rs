//! Comment service for projects and sub-projects.
//!
//! Reads are gated by the parent entity's visibility; edits and deletes are
//! restricted to the author or an admin.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, Attachment, Comment};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::CommentScope;
use crate::infra::UnitOfWork;

/// Comment input from the API layer.
#[derive(Debug, Clone)]
pub struct CommentInput {
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

/// Comment use cases, parameterized over the parent collection.
#[async_trait]
pub trait CommentService: Send + Sync {
    async fn list(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
    ) -> AppResult<Vec<Comment>>;

    async fn create(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        input: CommentInput,
    ) -> AppResult<Comment>;

    /// Author or admin only.
    async fn update(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        comment_id: i32,
        text: Option<String>,
    ) -> AppResult<Comment>;

    /// Author or admin only.
    async fn delete(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        comment_id: i32,
    ) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct CommentDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CommentDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve the parent entity and apply existence hiding.
    async fn parent_visible(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
    ) -> AppResult<()> {
        let visibility = resolve_scope(self.uow.as_ref(), actor).await?;

        let project_id = match scope {
            CommentScope::Project => parent_id,
            CommentScope::SubProject => {
                self.uow
                    .subprojects()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(AppError::NotFound)?
                    .project_id
            }
        };

        let project = self
            .uow
            .projects()
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !visibility.includes_project(
            project.main_responsible_manager_id,
            &project.secondary_responsible_manager_ids,
        ) {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Fetch a comment and check it belongs to the claimed parent.
    async fn owned_by_parent(
        &self,
        scope: CommentScope,
        parent_id: i32,
        comment_id: i32,
    ) -> AppResult<Comment> {
        let comment = self
            .uow
            .comments()
            .find_by_id(scope, comment_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if comment.parent_id != parent_id {
            return Err(AppError::NotFound);
        }
        Ok(comment)
    }
}

#[async_trait]
impl<U: UnitOfWork> CommentService for CommentDesk<U> {
    async fn list(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
    ) -> AppResult<Vec<Comment>> {
        self.parent_visible(actor, scope, parent_id).await?;
        self.uow.comments().list_for_parent(scope, parent_id).await
    }

    async fn create(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        input: CommentInput,
    ) -> AppResult<Comment> {
        if input.text.is_none() && input.attachment.is_none() {
            return Err(AppError::validation("Comment needs text or an attachment"));
        }
        self.parent_visible(actor, scope, parent_id).await?;
        self.uow
            .comments()
            .create(
                scope,
                crate::domain::CreateComment {
                    parent_id,
                    author_manager_id: actor.id,
                    text: input.text,
                    attachment: input.attachment,
                },
            )
            .await
    }

    async fn update(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        comment_id: i32,
        text: Option<String>,
    ) -> AppResult<Comment> {
        self.parent_visible(actor, scope, parent_id).await?;
        let comment = self.owned_by_parent(scope, parent_id, comment_id).await?;
        if !comment.can_modify(&actor) {
            return Err(AppError::Forbidden);
        }
        self.uow.comments().update_text(scope, comment_id, text).await
    }

    async fn delete(
        &self,
        actor: Actor,
        scope: CommentScope,
        parent_id: i32,
        comment_id: i32,
    ) -> AppResult<()> {
        self.parent_visible(actor, scope, parent_id).await?;
        let comment = self.owned_by_parent(scope, parent_id, comment_id).await?;
        if !comment.can_modify(&actor) {
            return Err(AppError::Forbidden);
        }
        // Attachment files are not removed here; the client deletes them
        // explicitly through the upload endpoint
        self.uow.comments().delete(scope, comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::repositories::{MockCommentRepository, MockProjectRepository};
    use crate::services::tests::{comment, project, TestUow};

    #[tokio::test]
    async fn comments_hidden_behind_project_visibility() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(7), vec![]))));

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        let service = CommentDesk::new(Arc::new(uow));

        let result = service
            .list(Actor::new(3, Role::Manager), CommentScope::Project, 1)
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn non_author_cannot_delete() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(3), vec![4]))));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(comment(id, 1, 3))));

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        uow.comments = Arc::new(comments);
        let service = CommentDesk::new(Arc::new(uow));

        // Manager 4 co-owns the project so the comment is visible, but
        // manager 3 wrote it
        let result = service
            .delete(Actor::new(4, Role::Manager), CommentScope::Project, 1, 10)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn empty_comment_rejected() {
        let uow = TestUow::default();
        let service = CommentDesk::new(Arc::new(uow));

        let result = service
            .create(
                Actor::new(1, Role::Admin),
                CommentScope::Project,
                1,
                CommentInput {
                    text: None,
                    attachment: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
