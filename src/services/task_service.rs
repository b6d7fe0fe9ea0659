//! Task service.
//!
//! The one place where authorization failures split: an invisible task reads
//! as NotFound, while a visible task whose mutation policy rejects the actor
//! reads as Forbidden.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, CreateTask, Task, UpdateTask};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Task use cases.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Task>;

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Task>>;

    async fn create(&self, actor: Actor, data: CreateTask) -> AppResult<Task>;

    /// Descriptive fields; creator or admin only.
    async fn update(&self, actor: Actor, id: i32, data: UpdateTask) -> AppResult<Task>;

    /// Status; assignee or admin only.
    async fn set_status(&self, actor: Actor, id: i32, status: String) -> AppResult<Task>;

    /// Creator or admin only.
    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct TaskDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TaskDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn visible(&self, actor: Actor, id: i32) -> AppResult<Task> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let task = self
            .uow
            .tasks()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !scope.includes_task(task.responsible_manager_id, task.creator_manager_id) {
            return Err(AppError::NotFound);
        }
        Ok(task)
    }
}

#[async_trait]
impl<U: UnitOfWork> TaskService for TaskDesk<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Task> {
        self.visible(actor, id).await
    }

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Task>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let (tasks, total) = self.uow.tasks().list(scope, page).await?;
        Ok(Paginated::new(tasks, page, total))
    }

    async fn create(&self, actor: Actor, data: CreateTask) -> AppResult<Task> {
        self.uow.tasks().create(actor.id, data).await
    }

    async fn update(&self, actor: Actor, id: i32, data: UpdateTask) -> AppResult<Task> {
        let task = self.visible(actor, id).await?;
        if !task.can_edit(&actor) {
            return Err(AppError::Forbidden);
        }
        self.uow.tasks().update(id, data).await
    }

    async fn set_status(&self, actor: Actor, id: i32, status: String) -> AppResult<Task> {
        let task = self.visible(actor, id).await?;
        if !task.can_change_status(&actor) {
            return Err(AppError::Forbidden);
        }
        self.uow.tasks().set_status(id, status).await
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        let task = self.visible(actor, id).await?;
        if !task.can_edit(&actor) {
            return Err(AppError::Forbidden);
        }
        self.uow.tasks().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::repositories::MockTaskRepository;
    use crate::services::tests::{task, TestUow};

    fn desk_with(tasks: MockTaskRepository) -> TaskDesk<TestUow> {
        let mut uow = TestUow::default();
        uow.tasks = Arc::new(tasks);
        TaskDesk::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn assignee_changes_status_but_cannot_edit() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .returning(|id| Ok(Some(task(id, 1, Some(2)))));
        tasks.expect_set_status().returning(|id, status| {
            let mut t = task(id, 1, Some(2));
            t.status = status;
            Ok(t)
        });
        let service = desk_with(tasks);
        let assignee = Actor::new(2, Role::Manager);

        let status = service.set_status(assignee, 1, "done".into()).await;
        assert!(status.is_ok());

        let edit = service.update(assignee, 1, UpdateTask::default()).await;
        assert!(matches!(edit, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn creator_edits_but_cannot_change_status() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .returning(|id| Ok(Some(task(id, 1, Some(2)))));
        tasks
            .expect_update()
            .returning(|id, _| Ok(task(id, 1, Some(2))));
        let service = desk_with(tasks);
        let creator = Actor::new(1, Role::Manager);

        let edit = service.update(creator, 1, UpdateTask::default()).await;
        assert!(edit.is_ok());

        let status = service.set_status(creator, 1, "done".into()).await;
        assert!(matches!(status, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn stranger_cannot_even_see_the_task() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .returning(|id| Ok(Some(task(id, 1, Some(2)))));
        let service = desk_with(tasks);

        let result = service.get(Actor::new(9, Role::Manager), 1).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn admin_bypasses_both_policies() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_find_by_id()
            .returning(|id| Ok(Some(task(id, 1, Some(2)))));
        tasks
            .expect_update()
            .returning(|id, _| Ok(task(id, 1, Some(2))));
        tasks
            .expect_set_status()
            .returning(|id, _| Ok(task(id, 1, Some(2))));
        let service = desk_with(tasks);
        let admin = Actor::new(99, Role::Admin);

        assert!(service.update(admin, 1, UpdateTask::default()).await.is_ok());
        assert!(service.set_status(admin, 1, "done".into()).await.is_ok());
    }
}
