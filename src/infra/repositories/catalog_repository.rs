//! Catalog dictionaries: services, units, warehouses, sub-project statuses.
//!
//! Dictionary data is not ownership-scoped; every authenticated manager sees
//! the full lists.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::entities::{service_item, subproject_status, unit, warehouse};
use crate::domain::{
    CreateServiceItem, ServiceItem, SubProjectStatus, Unit, UpdateServiceItem, Warehouse,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Sellable service persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceItem>>;
    async fn list(&self, page: PaginationParams) -> AppResult<(Vec<ServiceItem>, u64)>;
    async fn create(&self, data: CreateServiceItem) -> AppResult<ServiceItem>;
    async fn update(&self, id: i32, data: UpdateServiceItem) -> AppResult<ServiceItem>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Measurement unit dictionary operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Unit>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Unit>>;
    async fn create(&self, name: String, abbreviation: String) -> AppResult<Unit>;
    async fn update(&self, id: i32, name: Option<String>, abbreviation: Option<String>)
        -> AppResult<Unit>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Warehouse dictionary operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Warehouse>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Warehouse>>;
    async fn create(&self, name: String) -> AppResult<Warehouse>;
    async fn update(&self, id: i32, name: String) -> AppResult<Warehouse>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Sub-project status dictionary operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubProjectStatusRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<SubProjectStatus>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<SubProjectStatus>>;
    async fn create(&self, name: String) -> AppResult<SubProjectStatus>;
    async fn update(&self, id: i32, name: String) -> AppResult<SubProjectStatus>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed store for all catalog dictionaries.
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn service_to_domain(model: service_item::Model) -> ServiceItem {
    ServiceItem {
        id: model.id,
        name: model.name,
        price: model.price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl ServiceItemRepository for CatalogStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceItem>> {
        let model = service_item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(service_to_domain))
    }

    async fn list(&self, page: PaginationParams) -> AppResult<(Vec<ServiceItem>, u64)> {
        let paginator = service_item::Entity::find()
            .order_by_asc(service_item::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(service_to_domain).collect(), total))
    }

    async fn create(&self, data: CreateServiceItem) -> AppResult<ServiceItem> {
        let now = Utc::now();
        let model = service_item::ActiveModel {
            name: Set(data.name),
            price: Set(data.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(service_to_domain(model))
    }

    async fn update(&self, id: i32, data: UpdateServiceItem) -> AppResult<ServiceItem> {
        let model = service_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: service_item::ActiveModel = model.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(price) = data.price {
            active.price = Set(price);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(service_to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = service_item::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UnitRepository for CatalogStore {
    async fn list(&self) -> AppResult<Vec<Unit>> {
        let models = unit::Entity::find()
            .order_by_asc(unit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| Unit {
                id: m.id,
                name: m.name,
                abbreviation: m.abbreviation,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Unit>> {
        let model = unit::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| Unit {
            id: m.id,
            name: m.name,
            abbreviation: m.abbreviation,
        }))
    }

    async fn create(&self, name: String, abbreviation: String) -> AppResult<Unit> {
        let model = unit::ActiveModel {
            name: Set(name),
            abbreviation: Set(abbreviation),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(Unit {
            id: model.id,
            name: model.name,
            abbreviation: model.abbreviation,
        })
    }

    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        abbreviation: Option<String>,
    ) -> AppResult<Unit> {
        let model = unit::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: unit::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(abbreviation) = abbreviation {
            active.abbreviation = Set(abbreviation);
        }

        let model = active.update(&self.db).await?;
        Ok(Unit {
            id: model.id,
            name: model.name,
            abbreviation: model.abbreviation,
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = unit::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl WarehouseRepository for CatalogStore {
    async fn list(&self) -> AppResult<Vec<Warehouse>> {
        let models = warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| Warehouse {
                id: m.id,
                name: m.name,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Warehouse>> {
        let model = warehouse::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| Warehouse {
            id: m.id,
            name: m.name,
        }))
    }

    async fn create(&self, name: String) -> AppResult<Warehouse> {
        let model = warehouse::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(Warehouse {
            id: model.id,
            name: model.name,
        })
    }

    async fn update(&self, id: i32, name: String) -> AppResult<Warehouse> {
        let model = warehouse::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: warehouse::ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await?;
        Ok(Warehouse {
            id: model.id,
            name: model.name,
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = warehouse::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl SubProjectStatusRepository for CatalogStore {
    async fn list(&self) -> AppResult<Vec<SubProjectStatus>> {
        let models = subproject_status::Entity::find()
            .order_by_asc(subproject_status::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| SubProjectStatus {
                id: m.id,
                name: m.name,
            })
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<SubProjectStatus>> {
        use sea_orm::ColumnTrait;
        use sea_orm::QueryFilter;

        let model = subproject_status::Entity::find()
            .filter(subproject_status::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| SubProjectStatus {
            id: m.id,
            name: m.name,
        }))
    }

    async fn create(&self, name: String) -> AppResult<SubProjectStatus> {
        let model = subproject_status::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(SubProjectStatus {
            id: model.id,
            name: model.name,
        })
    }

    async fn update(&self, id: i32, name: String) -> AppResult<SubProjectStatus> {
        let model = subproject_status::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: subproject_status::ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await?;
        Ok(SubProjectStatus {
            id: model.id,
            name: model.name,
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = subproject_status::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
