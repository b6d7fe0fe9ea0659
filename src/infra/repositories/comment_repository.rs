//! Comment repository covering both comment collections.
//!
//! Project comments and sub-project comments are separate tables with the
//! same shape; `CommentScope` selects which one an operation touches.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::{project_comment, subproject_comment};
use crate::domain::{Attachment, Comment, CreateComment};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Which comment collection an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentScope {
    Project,
    SubProject,
}

/// Comment persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, scope: CommentScope, id: i32) -> AppResult<Option<Comment>>;

    /// Comments on one parent, oldest first.
    async fn list_for_parent(&self, scope: CommentScope, parent_id: i32)
        -> AppResult<Vec<Comment>>;

    async fn create(&self, scope: CommentScope, data: CreateComment) -> AppResult<Comment>;

    async fn update_text(
        &self,
        scope: CommentScope,
        id: i32,
        text: Option<String>,
    ) -> AppResult<Comment>;

    async fn delete(&self, scope: CommentScope, id: i32) -> AppResult<()>;
}

/// SeaORM-backed comment store.
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn attachment(
    file_name: Option<String>,
    file_type: Option<String>,
    file_url: Option<String>,
) -> Option<Attachment> {
    match (file_name, file_type, file_url) {
        (Some(file_name), Some(file_type), Some(file_url)) => Some(Attachment {
            file_name,
            file_type,
            file_url,
        }),
        _ => None,
    }
}

fn project_to_domain(model: project_comment::Model) -> Comment {
    Comment {
        id: model.id,
        parent_id: model.project_id,
        author_manager_id: model.author_manager_id,
        text: model.text,
        attachment: attachment(model.file_name, model.file_type, model.file_url),
        created_at: model.created_at,
    }
}

fn subproject_to_domain(model: subproject_comment::Model) -> Comment {
    Comment {
        id: model.id,
        parent_id: model.subproject_id,
        author_manager_id: model.author_manager_id,
        text: model.text,
        attachment: attachment(model.file_name, model.file_type, model.file_url),
        created_at: model.created_at,
    }
}

fn split_attachment(
    attachment: Option<Attachment>,
) -> (Option<String>, Option<String>, Option<String>) {
    match attachment {
        Some(a) => (Some(a.file_name), Some(a.file_type), Some(a.file_url)),
        None => (None, None, None),
    }
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn find_by_id(&self, scope: CommentScope, id: i32) -> AppResult<Option<Comment>> {
        match scope {
            CommentScope::Project => {
                let model = project_comment::Entity::find_by_id(id).one(&self.db).await?;
                Ok(model.map(project_to_domain))
            }
            CommentScope::SubProject => {
                let model = subproject_comment::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?;
                Ok(model.map(subproject_to_domain))
            }
        }
    }

    async fn list_for_parent(
        &self,
        scope: CommentScope,
        parent_id: i32,
    ) -> AppResult<Vec<Comment>> {
        match scope {
            CommentScope::Project => {
                let models = project_comment::Entity::find()
                    .filter(project_comment::Column::ProjectId.eq(parent_id))
                    .order_by_asc(project_comment::Column::CreatedAt)
                    .all(&self.db)
                    .await?;
                Ok(models.into_iter().map(project_to_domain).collect())
            }
            CommentScope::SubProject => {
                let models = subproject_comment::Entity::find()
                    .filter(subproject_comment::Column::SubprojectId.eq(parent_id))
                    .order_by_asc(subproject_comment::Column::CreatedAt)
                    .all(&self.db)
                    .await?;
                Ok(models.into_iter().map(subproject_to_domain).collect())
            }
        }
    }

    async fn create(&self, scope: CommentScope, data: CreateComment) -> AppResult<Comment> {
        let (file_name, file_type, file_url) = split_attachment(data.attachment);
        let now = Utc::now();

        match scope {
            CommentScope::Project => {
                let model = project_comment::ActiveModel {
                    project_id: Set(data.parent_id),
                    author_manager_id: Set(Some(data.author_manager_id)),
                    text: Set(data.text),
                    file_name: Set(file_name),
                    file_type: Set(file_type),
                    file_url: Set(file_url),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                Ok(project_to_domain(model))
            }
            CommentScope::SubProject => {
                let model = subproject_comment::ActiveModel {
                    subproject_id: Set(data.parent_id),
                    author_manager_id: Set(Some(data.author_manager_id)),
                    text: Set(data.text),
                    file_name: Set(file_name),
                    file_type: Set(file_type),
                    file_url: Set(file_url),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                Ok(subproject_to_domain(model))
            }
        }
    }

    async fn update_text(
        &self,
        scope: CommentScope,
        id: i32,
        text: Option<String>,
    ) -> AppResult<Comment> {
        match scope {
            CommentScope::Project => {
                let model = project_comment::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(AppError::NotFound)?;
                let mut active: project_comment::ActiveModel = model.into();
                active.text = Set(text);
                let model = active.update(&self.db).await?;
                Ok(project_to_domain(model))
            }
            CommentScope::SubProject => {
                let model = subproject_comment::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(AppError::NotFound)?;
                let mut active: subproject_comment::ActiveModel = model.into();
                active.text = Set(text);
                let model = active.update(&self.db).await?;
                Ok(subproject_to_domain(model))
            }
        }
    }

    async fn delete(&self, scope: CommentScope, id: i32) -> AppResult<()> {
        let rows_affected = match scope {
            CommentScope::Project => {
                project_comment::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
            CommentScope::SubProject => {
                subproject_comment::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await?
                    .rows_affected
            }
        };
        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
