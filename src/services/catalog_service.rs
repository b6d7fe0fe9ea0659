//! Catalog service: sellable services, units, warehouses, and the
//! sub-project status dictionary.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    CreateServiceItem, ServiceItem, SubProjectStatus, Unit, UpdateServiceItem, Warehouse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Dictionary use cases. None of these are ownership-scoped.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_service_item(&self, id: i32) -> AppResult<ServiceItem>;
    async fn list_service_items(&self, page: PaginationParams)
        -> AppResult<Paginated<ServiceItem>>;
    async fn create_service_item(&self, data: CreateServiceItem) -> AppResult<ServiceItem>;
    async fn update_service_item(&self, id: i32, data: UpdateServiceItem)
        -> AppResult<ServiceItem>;
    async fn delete_service_item(&self, id: i32) -> AppResult<()>;

    async fn list_units(&self) -> AppResult<Vec<Unit>>;
    async fn get_unit(&self, id: i32) -> AppResult<Unit>;
    async fn create_unit(&self, name: String, abbreviation: String) -> AppResult<Unit>;
    async fn update_unit(
        &self,
        id: i32,
        name: Option<String>,
        abbreviation: Option<String>,
    ) -> AppResult<Unit>;
    async fn delete_unit(&self, id: i32) -> AppResult<()>;

    async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>>;
    async fn get_warehouse(&self, id: i32) -> AppResult<Warehouse>;
    async fn create_warehouse(&self, name: String) -> AppResult<Warehouse>;
    async fn update_warehouse(&self, id: i32, name: String) -> AppResult<Warehouse>;
    async fn delete_warehouse(&self, id: i32) -> AppResult<()>;

    async fn list_subproject_statuses(&self) -> AppResult<Vec<SubProjectStatus>>;
    async fn create_subproject_status(&self, name: String) -> AppResult<SubProjectStatus>;
    async fn update_subproject_status(&self, id: i32, name: String)
        -> AppResult<SubProjectStatus>;
    async fn delete_subproject_status(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct CatalogDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogDesk<U> {
    async fn get_service_item(&self, id: i32) -> AppResult<ServiceItem> {
        self.uow
            .service_items()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_service_items(
        &self,
        page: PaginationParams,
    ) -> AppResult<Paginated<ServiceItem>> {
        let (items, total) = self.uow.service_items().list(page).await?;
        Ok(Paginated::new(items, page, total))
    }

    async fn create_service_item(&self, data: CreateServiceItem) -> AppResult<ServiceItem> {
        self.uow.service_items().create(data).await
    }

    async fn update_service_item(
        &self,
        id: i32,
        data: UpdateServiceItem,
    ) -> AppResult<ServiceItem> {
        self.uow.service_items().update(id, data).await
    }

    async fn delete_service_item(&self, id: i32) -> AppResult<()> {
        self.uow.service_items().delete(id).await
    }

    async fn list_units(&self) -> AppResult<Vec<Unit>> {
        self.uow.units().list().await
    }

    async fn get_unit(&self, id: i32) -> AppResult<Unit> {
        self.uow
            .units()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_unit(&self, name: String, abbreviation: String) -> AppResult<Unit> {
        self.uow.units().create(name, abbreviation).await
    }

    async fn update_unit(
        &self,
        id: i32,
        name: Option<String>,
        abbreviation: Option<String>,
    ) -> AppResult<Unit> {
        self.uow.units().update(id, name, abbreviation).await
    }

    async fn delete_unit(&self, id: i32) -> AppResult<()> {
        self.uow.units().delete(id).await
    }

    async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>> {
        self.uow.warehouses().list().await
    }

    async fn get_warehouse(&self, id: i32) -> AppResult<Warehouse> {
        self.uow
            .warehouses()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_warehouse(&self, name: String) -> AppResult<Warehouse> {
        self.uow.warehouses().create(name).await
    }

    async fn update_warehouse(&self, id: i32, name: String) -> AppResult<Warehouse> {
        self.uow.warehouses().update(id, name).await
    }

    async fn delete_warehouse(&self, id: i32) -> AppResult<()> {
        self.uow.warehouses().delete(id).await
    }

    async fn list_subproject_statuses(&self) -> AppResult<Vec<SubProjectStatus>> {
        self.uow.subproject_statuses().list().await
    }

    async fn create_subproject_status(&self, name: String) -> AppResult<SubProjectStatus> {
        if self
            .uow
            .subproject_statuses()
            .find_by_name(&name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Status"));
        }
        self.uow.subproject_statuses().create(name).await
    }

    async fn update_subproject_status(&self, id: i32, name: String) -> AppResult<SubProjectStatus> {
        self.uow.subproject_statuses().update(id, name).await
    }

    async fn delete_subproject_status(&self, id: i32) -> AppResult<()> {
        self.uow.subproject_statuses().delete(id).await
    }
}
