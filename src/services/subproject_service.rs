//! Sub-project service.
//!
//! Sub-projects inherit visibility from their parent project; every
//! operation resolves the parent first.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, CreateSubProject, SubProject, UpdateSubProject};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Sub-project use cases.
#[async_trait]
pub trait SubProjectService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<SubProject>;

    async fn list(&self, actor: Actor, page: PaginationParams)
        -> AppResult<Paginated<SubProject>>;

    async fn create(&self, actor: Actor, data: CreateSubProject) -> AppResult<SubProject>;

    async fn update(&self, actor: Actor, id: i32, data: UpdateSubProject)
        -> AppResult<SubProject>;

    /// Kanban move; the label must exist in the status dictionary.
    async fn set_status(&self, actor: Actor, id: i32, status: String) -> AppResult<SubProject>;

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct SubProjectDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SubProjectDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Existence hiding via the parent project's ownership.
    async fn parent_visible(&self, actor: Actor, project_id: i32) -> AppResult<()> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let project = self
            .uow
            .projects()
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !scope.includes_project(
            project.main_responsible_manager_id,
            &project.secondary_responsible_manager_ids,
        ) {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn visible(&self, actor: Actor, id: i32) -> AppResult<SubProject> {
        let subproject = self
            .uow
            .subprojects()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.parent_visible(actor, subproject.project_id).await?;
        Ok(subproject)
    }

    async fn validate_status(&self, status: &str) -> AppResult<()> {
        self.uow
            .subproject_statuses()
            .find_by_name(status)
            .await?
            .ok_or_else(|| AppError::validation("Unknown sub-project status"))?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> SubProjectService for SubProjectDesk<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<SubProject> {
        self.visible(actor, id).await
    }

    async fn list(
        &self,
        actor: Actor,
        page: PaginationParams,
    ) -> AppResult<Paginated<SubProject>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let visible_projects = self.uow.projects().ids_visible_to(scope).await?;
        let (subprojects, total) = self.uow.subprojects().list(visible_projects, page).await?;
        Ok(Paginated::new(subprojects, page, total))
    }

    async fn create(&self, actor: Actor, data: CreateSubProject) -> AppResult<SubProject> {
        self.parent_visible(actor, data.project_id).await?;
        self.validate_status(&data.status).await?;
        self.uow.subprojects().create(data).await
    }

    async fn update(
        &self,
        actor: Actor,
        id: i32,
        data: UpdateSubProject,
    ) -> AppResult<SubProject> {
        self.visible(actor, id).await?;
        if let Some(status) = &data.status {
            self.validate_status(status).await?;
        }
        self.uow.subprojects().update(id, data).await
    }

    async fn set_status(&self, actor: Actor, id: i32, status: String) -> AppResult<SubProject> {
        self.visible(actor, id).await?;
        self.validate_status(&status).await?;
        self.uow.subprojects().set_status(id, status).await
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        self.visible(actor, id).await?;
        self.uow.subprojects().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, SubProjectStatus};
    use crate::infra::repositories::{
        MockProjectRepository, MockSubProjectRepository, MockSubProjectStatusRepository,
    };
    use crate::services::tests::{project, subproject, TestUow};

    #[tokio::test]
    async fn subproject_of_invisible_project_reads_as_not_found() {
        let mut subprojects = MockSubProjectRepository::new();
        subprojects
            .expect_find_by_id()
            .returning(|id| Ok(Some(subproject(id, 10, "100.00"))));

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(7), vec![]))));

        let mut uow = TestUow::default();
        uow.subprojects = Arc::new(subprojects);
        uow.projects = Arc::new(projects);
        let service = SubProjectDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(3, Role::Manager), 1).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn status_move_validates_against_dictionary() {
        let mut subprojects = MockSubProjectRepository::new();
        subprojects
            .expect_find_by_id()
            .returning(|id| Ok(Some(subproject(id, 10, "100.00"))));

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(3), vec![]))));

        let mut statuses = MockSubProjectStatusRepository::new();
        statuses.expect_find_by_name().returning(|_| Ok(None));

        let mut uow = TestUow::default();
        uow.subprojects = Arc::new(subprojects);
        uow.projects = Arc::new(projects);
        uow.subproject_statuses = Arc::new(statuses);
        let service = SubProjectDesk::new(Arc::new(uow));

        let result = service
            .set_status(Actor::new(3, Role::Manager), 1, "no-such-column".into())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn status_move_with_known_label_succeeds() {
        let mut subprojects = MockSubProjectRepository::new();
        subprojects
            .expect_find_by_id()
            .returning(|id| Ok(Some(subproject(id, 10, "100.00"))));
        subprojects
            .expect_set_status()
            .returning(|id, status| {
                let mut s = subproject(id, 10, "100.00");
                s.status = status;
                Ok(s)
            });

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(3), vec![]))));

        let mut statuses = MockSubProjectStatusRepository::new();
        statuses.expect_find_by_name().returning(|name| {
            Ok(Some(SubProjectStatus {
                id: 1,
                name: name.to_string(),
            }))
        });

        let mut uow = TestUow::default();
        uow.subprojects = Arc::new(subprojects);
        uow.projects = Arc::new(projects);
        uow.subproject_statuses = Arc::new(statuses);
        let service = SubProjectDesk::new(Arc::new(uow));

        let result = service
            .set_status(Actor::new(3, Role::Manager), 1, "in progress".into())
            .await
            .unwrap();
        assert_eq!(result.status, "in progress");
    }
}
