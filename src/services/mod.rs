//! Application services layer - use cases and authorization decisions.
//!
//! Services resolve the requester's visibility scope, apply the existence
//! hiding and mutation policies, and delegate persistence to the Unit of
//! Work. Handlers never touch repositories directly.

mod auth_service;
mod catalog_service;
mod comment_service;
pub mod container;
mod counterparty_service;
mod funnel_service;
mod manager_service;
mod product_service;
mod project_service;
mod sale_service;
mod subproject_service;
mod task_service;
mod upload_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use catalog_service::{CatalogDesk, CatalogService};
pub use comment_service::{CommentDesk, CommentInput, CommentService};
pub use counterparty_service::{CounterpartyDesk, CounterpartyService};
pub use funnel_service::{FunnelDesk, FunnelService, FunnelWithStages};
pub use manager_service::{ManagerDirectory, ManagerService, NewManager};
pub use product_service::{ProductCatalog, ProductService};
pub use project_service::{ProjectDesk, ProjectService};
pub use sale_service::{SaleDesk, SaleService};
pub use subproject_service::{SubProjectDesk, SubProjectService};
pub use task_service::{TaskDesk, TaskService};
pub use upload_service::{UploadDesk, UploadService};

#[cfg(test)]
pub use container::MockServiceContainer;

use crate::domain::{Actor, Role, Scope};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Resolve the requester's visibility scope.
///
/// Only heads need the subordinate lookup; admins and plain managers are
/// decided from the claims alone.
pub(crate) async fn resolve_scope<U: UnitOfWork>(uow: &U, actor: Actor) -> AppResult<Scope> {
    let subordinates = match actor.role {
        Role::Head => uow.managers().subordinate_ids(actor.id).await?,
        _ => Vec::new(),
    };
    Ok(Scope::compute(actor.role, actor.id, &subordinates))
}

#[cfg(test)]
pub(crate) mod tests {
    //! Shared fixtures for service tests: a Unit of Work built from mock
    //! repositories, plus entity constructors.

    use std::sync::Arc;

    use chrono::Utc;

    use crate::domain::{
        Comment, Counterparty, CounterpartyKind, Manager, Project, Role, Sale, SubProject, Task,
    };
    use crate::infra::repositories::{
        CommentRepository, CounterpartyRepository, FunnelRepository, ManagerRepository,
        MockCommentRepository, MockCounterpartyRepository, MockFunnelRepository,
        MockManagerRepository, MockProductRepository, MockProjectRepository, MockSaleRepository,
        MockServiceItemRepository, MockSubProjectRepository, MockSubProjectStatusRepository,
        MockTaskRepository, MockUnitRepository, MockWarehouseRepository, ProductRepository,
        ProjectRepository, SaleRepository, ServiceItemRepository, SubProjectRepository,
        SubProjectStatusRepository, TaskRepository, UnitRepository, WarehouseRepository,
    };
    use crate::infra::UnitOfWork;

    /// Unit of Work over mock repositories. Tests replace the fields they
    /// care about; untouched mocks panic on use, which is what we want.
    pub(crate) struct TestUow {
        pub managers: Arc<MockManagerRepository>,
        pub counterparties: Arc<MockCounterpartyRepository>,
        pub products: Arc<MockProductRepository>,
        pub service_items: Arc<MockServiceItemRepository>,
        pub units: Arc<MockUnitRepository>,
        pub warehouses: Arc<MockWarehouseRepository>,
        pub subproject_statuses: Arc<MockSubProjectStatusRepository>,
        pub sales: Arc<MockSaleRepository>,
        pub projects: Arc<MockProjectRepository>,
        pub subprojects: Arc<MockSubProjectRepository>,
        pub tasks: Arc<MockTaskRepository>,
        pub funnels: Arc<MockFunnelRepository>,
        pub comments: Arc<MockCommentRepository>,
    }

    impl Default for TestUow {
        fn default() -> Self {
            Self {
                managers: Arc::new(MockManagerRepository::new()),
                counterparties: Arc::new(MockCounterpartyRepository::new()),
                products: Arc::new(MockProductRepository::new()),
                service_items: Arc::new(MockServiceItemRepository::new()),
                units: Arc::new(MockUnitRepository::new()),
                warehouses: Arc::new(MockWarehouseRepository::new()),
                subproject_statuses: Arc::new(MockSubProjectStatusRepository::new()),
                sales: Arc::new(MockSaleRepository::new()),
                projects: Arc::new(MockProjectRepository::new()),
                subprojects: Arc::new(MockSubProjectRepository::new()),
                tasks: Arc::new(MockTaskRepository::new()),
                funnels: Arc::new(MockFunnelRepository::new()),
                comments: Arc::new(MockCommentRepository::new()),
            }
        }
    }

    impl UnitOfWork for TestUow {
        fn managers(&self) -> Arc<dyn ManagerRepository> {
            self.managers.clone()
        }
        fn counterparties(&self) -> Arc<dyn CounterpartyRepository> {
            self.counterparties.clone()
        }
        fn products(&self) -> Arc<dyn ProductRepository> {
            self.products.clone()
        }
        fn service_items(&self) -> Arc<dyn ServiceItemRepository> {
            self.service_items.clone()
        }
        fn units(&self) -> Arc<dyn UnitRepository> {
            self.units.clone()
        }
        fn warehouses(&self) -> Arc<dyn WarehouseRepository> {
            self.warehouses.clone()
        }
        fn subproject_statuses(&self) -> Arc<dyn SubProjectStatusRepository> {
            self.subproject_statuses.clone()
        }
        fn sales(&self) -> Arc<dyn SaleRepository> {
            self.sales.clone()
        }
        fn projects(&self) -> Arc<dyn ProjectRepository> {
            self.projects.clone()
        }
        fn subprojects(&self) -> Arc<dyn SubProjectRepository> {
            self.subprojects.clone()
        }
        fn tasks(&self) -> Arc<dyn TaskRepository> {
            self.tasks.clone()
        }
        fn funnels(&self) -> Arc<dyn FunnelRepository> {
            self.funnels.clone()
        }
        fn comments(&self) -> Arc<dyn CommentRepository> {
            self.comments.clone()
        }
    }

    pub(crate) fn uow_with_managers(managers: MockManagerRepository) -> TestUow {
        TestUow {
            managers: Arc::new(managers),
            ..TestUow::default()
        }
    }

    pub(crate) fn manager(id: i32, role: Role, supervisor_ids: Vec<i32>) -> Manager {
        Manager {
            id,
            email: format!("manager{id}@example.com"),
            password_hash: "hash".into(),
            first_name: "Test".into(),
            last_name: format!("Manager{id}"),
            role,
            supervisor_ids,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn counterparty(id: i32, responsible: Option<i32>) -> Counterparty {
        Counterparty {
            id,
            name: "Acme GmbH".into(),
            kind: CounterpartyKind::LegalEntity,
            responsible_manager_id: responsible,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn sale(id: i32, responsible: Option<i32>) -> Sale {
        Sale {
            id,
            counterparty_id: 1,
            responsible_manager_id: responsible,
            sale_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            status: "new".into(),
            deferred_payment_date: None,
            project_id: None,
            products: vec![],
            services: vec![],
            total_price: rust_decimal::Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn project(id: i32, main: Option<i32>, secondaries: Vec<i32>) -> Project {
        Project {
            id,
            name: "Rollout".into(),
            forecast_amount: "25000.00".parse().unwrap(),
            counterparty_id: Some(1),
            main_responsible_manager_id: main,
            secondary_responsible_manager_ids: secondaries,
            funnel_id: Some(1),
            funnel_stage_id: Some(1),
            services: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn subproject(id: i32, project_id: i32, cost: &str) -> SubProject {
        SubProject {
            id,
            name: "Phase".into(),
            cost: cost.parse().unwrap(),
            status: "new".into(),
            project_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn task(id: i32, creator: i32, assignee: Option<i32>) -> Task {
        Task {
            id,
            title: "Call the client".into(),
            description: None,
            responsible_manager_id: assignee,
            creator_manager_id: Some(creator),
            project_id: None,
            subproject_id: None,
            due_date: None,
            status: "open".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn comment(id: i32, parent_id: i32, author: i32) -> Comment {
        Comment {
            id,
            parent_id,
            author_manager_id: Some(author),
            text: Some("Looks good".into()),
            attachment: None,
            created_at: Utc::now(),
        }
    }
}
