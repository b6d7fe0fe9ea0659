//! Task repository.
//!
//! Task visibility keys off two columns at once: the assignee or the creator
//! being in scope makes the task visible.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::task;
use crate::domain::{CreateTask, Scope, Task, UpdateTask};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Task persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Task>>;

    /// Scoped by assignee OR creator.
    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Task>, u64)>;

    async fn create(&self, creator_manager_id: i32, data: CreateTask) -> AppResult<Task>;

    async fn update(&self, id: i32, data: UpdateTask) -> AppResult<Task>;

    async fn set_status(&self, id: i32, status: String) -> AppResult<Task>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed task store.
pub struct TaskStore {
    db: DatabaseConnection,
}

impl TaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: task::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        description: model.description,
        responsible_manager_id: model.responsible_manager_id,
        creator_manager_id: model.creator_manager_id,
        project_id: model.project_id,
        subproject_id: model.subproject_id,
        due_date: model.due_date,
        status: model.status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Task>> {
        let model = task::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(to_domain))
    }

    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Task>, u64)> {
        let mut query = task::Entity::find().order_by_asc(task::Column::Id);
        if let Some(ids) = scope.ids() {
            let scope_ids: Vec<i32> = ids.iter().copied().collect();
            query = query.filter(
                Condition::any()
                    .add(task::Column::ResponsibleManagerId.is_in(scope_ids.clone()))
                    .add(task::Column::CreatorManagerId.is_in(scope_ids)),
            );
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }

    async fn create(&self, creator_manager_id: i32, data: CreateTask) -> AppResult<Task> {
        let now = Utc::now();
        let model = task::ActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            responsible_manager_id: Set(data.responsible_manager_id),
            creator_manager_id: Set(Some(creator_manager_id)),
            project_id: Set(data.project_id),
            subproject_id: Set(data.subproject_id),
            due_date: Set(data.due_date),
            status: Set(data.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_domain(model))
    }

    async fn update(&self, id: i32, data: UpdateTask) -> AppResult<Task> {
        let model = task::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: task::ActiveModel = model.into();
        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(description) = data.description {
            active.description = Set(description);
        }
        if let Some(responsible) = data.responsible_manager_id {
            active.responsible_manager_id = Set(responsible);
        }
        if let Some(project_id) = data.project_id {
            active.project_id = Set(project_id);
        }
        if let Some(subproject_id) = data.subproject_id {
            active.subproject_id = Set(subproject_id);
        }
        if let Some(due_date) = data.due_date {
            active.due_date = Set(due_date);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn set_status(&self, id: i32, status: String) -> AppResult<Task> {
        let model = task::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: task::ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
