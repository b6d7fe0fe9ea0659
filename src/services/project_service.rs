//! Project service: CRUD, pipeline moves, the aggregated service list, and
//! the derived cost.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{project_cost, Actor, CreateProject, Project, UpdateProject};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Project use cases.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Project>;

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Project>>;

    async fn create(&self, actor: Actor, data: CreateProject) -> AppResult<Project>;

    async fn update(&self, actor: Actor, id: i32, data: UpdateProject) -> AppResult<Project>;

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;

    /// Move the project to a funnel stage. The project's funnel follows the
    /// stage's funnel, so a cross-funnel move stays consistent.
    async fn set_stage(&self, actor: Actor, id: i32, stage_id: i32) -> AppResult<Project>;

    /// Add a service to the project's aggregated list (tenths convention on
    /// duplicates).
    async fn add_service(&self, actor: Actor, id: i32, service_id: i32) -> AppResult<Project>;

    async fn remove_service(&self, actor: Actor, id: i32, service_id: i32) -> AppResult<Project>;

    /// Derived aggregate cost: service list plus sub-project costs.
    async fn cost(&self, actor: Actor, id: i32) -> AppResult<Decimal>;
}

/// Concrete implementation over the Unit of Work.
pub struct ProjectDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProjectDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn visible(&self, actor: Actor, id: i32) -> AppResult<Project> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let project = self
            .uow
            .projects()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !scope.includes_project(
            project.main_responsible_manager_id,
            &project.secondary_responsible_manager_ids,
        ) {
            return Err(AppError::NotFound);
        }
        Ok(project)
    }
}

#[async_trait]
impl<U: UnitOfWork> ProjectService for ProjectDesk<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Project> {
        self.visible(actor, id).await
    }

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Project>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let (projects, total) = self.uow.projects().list(scope, page).await?;
        Ok(Paginated::new(projects, page, total))
    }

    async fn create(&self, actor: Actor, mut data: CreateProject) -> AppResult<Project> {
        if data.main_responsible_manager_id.is_none() && !actor.is_admin() {
            data.main_responsible_manager_id = Some(actor.id);
        }

        // A stage reference must sit inside the referenced funnel
        if let Some(stage_id) = data.funnel_stage_id {
            let stage = self
                .uow
                .funnels()
                .find_stage(stage_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown funnel stage"))?;
            data.funnel_id = Some(stage.funnel_id);
        }

        self.uow.projects().create(data).await
    }

    async fn update(&self, actor: Actor, id: i32, mut data: UpdateProject) -> AppResult<Project> {
        self.visible(actor, id).await?;

        if let Some(Some(stage_id)) = data.funnel_stage_id {
            let stage = self
                .uow
                .funnels()
                .find_stage(stage_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown funnel stage"))?;
            data.funnel_id = Some(Some(stage.funnel_id));
        }

        self.uow.projects().update(id, data).await
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        self.visible(actor, id).await?;
        self.uow.projects().delete(id).await
    }

    async fn set_stage(&self, actor: Actor, id: i32, stage_id: i32) -> AppResult<Project> {
        self.visible(actor, id).await?;

        let stage = self
            .uow
            .funnels()
            .find_stage(stage_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow
            .projects()
            .set_stage(id, stage.id, stage.funnel_id)
            .await
    }

    async fn add_service(&self, actor: Actor, id: i32, service_id: i32) -> AppResult<Project> {
        self.visible(actor, id).await?;

        self.uow
            .service_items()
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::validation("Unknown service"))?;

        self.uow.projects().add_service(id, service_id).await
    }

    async fn remove_service(&self, actor: Actor, id: i32, service_id: i32) -> AppResult<Project> {
        self.visible(actor, id).await?;
        self.uow.projects().remove_service(id, service_id).await
    }

    async fn cost(&self, actor: Actor, id: i32) -> AppResult<Decimal> {
        let project = self.visible(actor, id).await?;
        let subprojects = self.uow.subprojects().list_for_project(id).await?;
        let subproject_costs: Vec<Decimal> = subprojects.into_iter().map(|s| s.cost).collect();
        Ok(project_cost(&project.services, &subproject_costs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FunnelStage, Role};
    use crate::infra::repositories::{
        MockFunnelRepository, MockProjectRepository, MockSubProjectRepository,
    };
    use crate::services::tests::{project, subproject, TestUow};

    #[tokio::test]
    async fn secondary_responsible_sees_project() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(7), vec![3]))));

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        let service = ProjectDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(3, Role::Manager), 1).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stranger_gets_not_found_for_existing_project() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(7), vec![8]))));

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        let service = ProjectDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(4, Role::Manager), 1).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn stage_move_repoints_funnel() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(3), vec![]))));
        // The repo must receive the stage's own funnel id, not the
        // project's current one
        projects
            .expect_set_stage()
            .withf(|id, stage_id, funnel_id| *id == 1 && *stage_id == 20 && *funnel_id == 9)
            .returning(|id, _, _| Ok(project(id, Some(3), vec![])));

        let mut funnels = MockFunnelRepository::new();
        funnels.expect_find_stage().returning(|stage_id| {
            Ok(Some(FunnelStage {
                id: stage_id,
                funnel_id: 9,
                name: "Negotiation".into(),
                order: 2,
            }))
        });

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        uow.funnels = Arc::new(funnels);
        let service = ProjectDesk::new(Arc::new(uow));

        let result = service.set_stage(Actor::new(3, Role::Manager), 1, 20).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn move_to_missing_stage_is_not_found() {
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .returning(|id| Ok(Some(project(id, Some(3), vec![]))));

        let mut funnels = MockFunnelRepository::new();
        funnels.expect_find_stage().returning(|_| Ok(None));

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        uow.funnels = Arc::new(funnels);
        let service = ProjectDesk::new(Arc::new(uow));

        let result = service.set_stage(Actor::new(3, Role::Manager), 1, 99).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn cost_sums_services_and_subprojects() {
        let mut projects = MockProjectRepository::new();
        projects.expect_find_by_id().returning(|id| {
            let mut p = project(id, Some(3), vec![]);
            p.services = vec![crate::domain::ProjectServiceLine {
                service_id: 1,
                service_name: "Audit".into(),
                price: "1000.00".parse().unwrap(),
                quantity: "1.1".parse().unwrap(),
            }];
            Ok(Some(p))
        });

        let mut subprojects = MockSubProjectRepository::new();
        subprojects.expect_list_for_project().returning(|project_id| {
            Ok(vec![
                subproject(1, project_id, "300.00"),
                subproject(2, project_id, "200.00"),
            ])
        });

        let mut uow = TestUow::default();
        uow.projects = Arc::new(projects);
        uow.subprojects = Arc::new(subprojects);
        let service = ProjectDesk::new(Arc::new(uow));

        let cost = service.cost(Actor::new(3, Role::Manager), 1).await.unwrap();
        assert_eq!(cost, "1600.00".parse::<Decimal>().unwrap());
    }
}
