//! Service container: one injection point for the API layer.

use std::sync::Arc;

use super::{
    AuthService, CatalogService, CommentService, CounterpartyService, FunnelService,
    ManagerService, ProductService, ProjectService, SaleService, SubProjectService, TaskService,
    UploadService,
};
use crate::config::Config;
use crate::infra::{DiskStorage, Persistence};

#[cfg(test)]
use mockall::automock;

/// Centralized access to every application service.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;
    fn managers(&self) -> Arc<dyn ManagerService>;
    fn counterparties(&self) -> Arc<dyn CounterpartyService>;
    fn products(&self) -> Arc<dyn ProductService>;
    fn catalog(&self) -> Arc<dyn CatalogService>;
    fn sales(&self) -> Arc<dyn SaleService>;
    fn projects(&self) -> Arc<dyn ProjectService>;
    fn subprojects(&self) -> Arc<dyn SubProjectService>;
    fn tasks(&self) -> Arc<dyn TaskService>;
    fn funnels(&self) -> Arc<dyn FunnelService>;
    fn comments(&self) -> Arc<dyn CommentService>;
    fn uploads(&self) -> Arc<dyn UploadService>;
}

/// Concrete container wired over one persistence layer.
pub struct Services {
    auth: Arc<dyn AuthService>,
    managers: Arc<dyn ManagerService>,
    counterparties: Arc<dyn CounterpartyService>,
    products: Arc<dyn ProductService>,
    catalog: Arc<dyn CatalogService>,
    sales: Arc<dyn SaleService>,
    projects: Arc<dyn ProjectService>,
    subprojects: Arc<dyn SubProjectService>,
    tasks: Arc<dyn TaskService>,
    funnels: Arc<dyn FunnelService>,
    comments: Arc<dyn CommentService>,
    uploads: Arc<dyn UploadService>,
}

impl Services {
    /// Wire every service over a database connection and configuration.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            Authenticator, CatalogDesk, CommentDesk, CounterpartyDesk, FunnelDesk,
            ManagerDirectory, ProductCatalog, ProjectDesk, SaleDesk, SubProjectDesk, TaskDesk,
            UploadDesk,
        };

        let uow = Arc::new(Persistence::new(db));
        let storage = Arc::new(DiskStorage::new(config.upload_dir.clone()));
        let max_upload = config.max_upload_size_bytes();

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            managers: Arc::new(ManagerDirectory::new(uow.clone())),
            counterparties: Arc::new(CounterpartyDesk::new(uow.clone())),
            products: Arc::new(ProductCatalog::new(uow.clone())),
            catalog: Arc::new(CatalogDesk::new(uow.clone())),
            sales: Arc::new(SaleDesk::new(uow.clone())),
            projects: Arc::new(ProjectDesk::new(uow.clone())),
            subprojects: Arc::new(SubProjectDesk::new(uow.clone())),
            tasks: Arc::new(TaskDesk::new(uow.clone())),
            funnels: Arc::new(FunnelDesk::new(uow.clone())),
            comments: Arc::new(CommentDesk::new(uow)),
            uploads: Arc::new(UploadDesk::new(storage, max_upload)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn managers(&self) -> Arc<dyn ManagerService> {
        self.managers.clone()
    }

    fn counterparties(&self) -> Arc<dyn CounterpartyService> {
        self.counterparties.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.products.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }

    fn sales(&self) -> Arc<dyn SaleService> {
        self.sales.clone()
    }

    fn projects(&self) -> Arc<dyn ProjectService> {
        self.projects.clone()
    }

    fn subprojects(&self) -> Arc<dyn SubProjectService> {
        self.subprojects.clone()
    }

    fn tasks(&self) -> Arc<dyn TaskService> {
        self.tasks.clone()
    }

    fn funnels(&self) -> Arc<dyn FunnelService> {
        self.funnels.clone()
    }

    fn comments(&self) -> Arc<dyn CommentService> {
        self.comments.clone()
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        self.uploads.clone()
    }
}
