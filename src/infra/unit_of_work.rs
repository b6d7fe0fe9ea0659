//! Unit of Work: centralized repository access.
//!
//! Multi-table writes commit or roll back inside the individual stores, so
//! this trait is a plain repository registry rather than a transaction
//! coordinator. Services stay generic over it and tests substitute mock
//! repositories.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CatalogStore, CommentRepository, CommentStore, CounterpartyRepository, CounterpartyStore,
    FunnelRepository, FunnelStore, ManagerRepository, ManagerStore, ProductRepository,
    ProductStore, ProjectRepository, ProjectStore, SaleRepository, SaleStore,
    ServiceItemRepository, SubProjectRepository, SubProjectStatusRepository, SubProjectStore,
    TaskRepository, TaskStore, UnitRepository, WarehouseRepository,
};

/// Access point to every repository behind one injection seam.
pub trait UnitOfWork: Send + Sync {
    fn managers(&self) -> Arc<dyn ManagerRepository>;
    fn counterparties(&self) -> Arc<dyn CounterpartyRepository>;
    fn products(&self) -> Arc<dyn ProductRepository>;
    fn service_items(&self) -> Arc<dyn ServiceItemRepository>;
    fn units(&self) -> Arc<dyn UnitRepository>;
    fn warehouses(&self) -> Arc<dyn WarehouseRepository>;
    fn subproject_statuses(&self) -> Arc<dyn SubProjectStatusRepository>;
    fn sales(&self) -> Arc<dyn SaleRepository>;
    fn projects(&self) -> Arc<dyn ProjectRepository>;
    fn subprojects(&self) -> Arc<dyn SubProjectRepository>;
    fn tasks(&self) -> Arc<dyn TaskRepository>;
    fn funnels(&self) -> Arc<dyn FunnelRepository>;
    fn comments(&self) -> Arc<dyn CommentRepository>;
}

/// SeaORM-backed implementation wired to one connection pool.
pub struct Persistence {
    managers: Arc<ManagerStore>,
    counterparties: Arc<CounterpartyStore>,
    products: Arc<ProductStore>,
    catalog: Arc<CatalogStore>,
    sales: Arc<SaleStore>,
    projects: Arc<ProjectStore>,
    subprojects: Arc<SubProjectStore>,
    tasks: Arc<TaskStore>,
    funnels: Arc<FunnelStore>,
    comments: Arc<CommentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            managers: Arc::new(ManagerStore::new(db.clone())),
            counterparties: Arc::new(CounterpartyStore::new(db.clone())),
            products: Arc::new(ProductStore::new(db.clone())),
            catalog: Arc::new(CatalogStore::new(db.clone())),
            sales: Arc::new(SaleStore::new(db.clone())),
            projects: Arc::new(ProjectStore::new(db.clone())),
            subprojects: Arc::new(SubProjectStore::new(db.clone())),
            tasks: Arc::new(TaskStore::new(db.clone())),
            funnels: Arc::new(FunnelStore::new(db.clone())),
            comments: Arc::new(CommentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
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
        self.catalog.clone()
    }

    fn units(&self) -> Arc<dyn UnitRepository> {
        self.catalog.clone()
    }

    fn warehouses(&self) -> Arc<dyn WarehouseRepository> {
        self.catalog.clone()
    }

    fn subproject_statuses(&self) -> Arc<dyn SubProjectStatusRepository> {
        self.catalog.clone()
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
