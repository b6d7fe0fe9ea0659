//! Product repository, including the all-or-nothing stock replacement.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::{product, product_stock};
use crate::domain::{CreateProduct, Product, StockRow, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Product persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;
    async fn list(&self, page: PaginationParams) -> AppResult<(Vec<Product>, u64)>;
    async fn create(&self, data: CreateProduct) -> AppResult<Product>;
    async fn update(&self, id: i32, data: UpdateProduct) -> AppResult<Product>;
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Current stock rows for a product.
    async fn stocks(&self, product_id: i32) -> AppResult<Vec<StockRow>>;

    /// Replace all stock rows for a product in one transaction. Either every
    /// row lands or none does; partial stock is never visible.
    async fn replace_stock(&self, product_id: i32, rows: Vec<StockRow>) -> AppResult<Vec<StockRow>>;
}

/// SeaORM-backed product store.
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: product::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        unit_id: model.unit_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(to_domain))
    }

    async fn list(&self, page: PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        let paginator = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(to_domain).collect(), total))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        let now = Utc::now();
        let model = product::ActiveModel {
            name: Set(data.name),
            price: Set(data.price),
            unit_id: Set(data.unit_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_domain(model))
    }

    async fn update(&self, id: i32, data: UpdateProduct) -> AppResult<Product> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: product::ActiveModel = model.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(price) = data.price {
            active.price = Set(price);
        }
        if let Some(unit_id) = data.unit_id {
            active.unit_id = Set(unit_id);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn stocks(&self, product_id: i32) -> AppResult<Vec<StockRow>> {
        let models = product_stock::Entity::find()
            .filter(product_stock::Column::ProductId.eq(product_id))
            .order_by_asc(product_stock::Column::WarehouseId)
            .all(&self.db)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| StockRow {
                warehouse_id: m.warehouse_id,
                quantity: m.quantity,
            })
            .collect())
    }

    async fn replace_stock(
        &self,
        product_id: i32,
        rows: Vec<StockRow>,
    ) -> AppResult<Vec<StockRow>> {
        let txn = self.db.begin().await?;

        product::Entity::find_by_id(product_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        product_stock::Entity::delete_many()
            .filter(product_stock::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;

        for row in &rows {
            if row.quantity < Decimal::ZERO {
                // Rolls the whole batch back
                txn.rollback().await?;
                return Err(AppError::validation("Stock quantity cannot be negative"));
            }
            product_stock::ActiveModel {
                product_id: Set(product_id),
                warehouse_id: Set(row.warehouse_id),
                quantity: Set(row.quantity),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(rows)
    }
}
