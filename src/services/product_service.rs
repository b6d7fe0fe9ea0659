//! Product service, including the bulk stock replacement.
//!
//! The goods catalog is not ownership-scoped; any authenticated manager can
//! read and mutate it.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateProduct, Product, StockRow, UpdateProduct};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Product use cases.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get(&self, id: i32) -> AppResult<Product>;
    async fn list(&self, page: PaginationParams) -> AppResult<Paginated<Product>>;
    async fn create(&self, data: CreateProduct) -> AppResult<Product>;
    async fn update(&self, id: i32, data: UpdateProduct) -> AppResult<Product>;
    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn stocks(&self, product_id: i32) -> AppResult<Vec<StockRow>>;

    /// Replace the product's stock rows atomically.
    async fn replace_stock(&self, product_id: i32, rows: Vec<StockRow>)
        -> AppResult<Vec<StockRow>>;
}

/// Concrete implementation over the Unit of Work.
pub struct ProductCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductCatalog<U> {
    async fn get(&self, id: i32) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self, page: PaginationParams) -> AppResult<Paginated<Product>> {
        let (products, total) = self.uow.products().list(page).await?;
        Ok(Paginated::new(products, page, total))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        if let Some(unit_id) = data.unit_id {
            self.uow
                .units()
                .find_by_id(unit_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown unit"))?;
        }
        self.uow.products().create(data).await
    }

    async fn update(&self, id: i32, data: UpdateProduct) -> AppResult<Product> {
        if let Some(Some(unit_id)) = data.unit_id {
            self.uow
                .units()
                .find_by_id(unit_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown unit"))?;
        }
        self.uow.products().update(id, data).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.products().delete(id).await
    }

    async fn stocks(&self, product_id: i32) -> AppResult<Vec<StockRow>> {
        self.uow.products().stocks(product_id).await
    }

    async fn replace_stock(
        &self,
        product_id: i32,
        rows: Vec<StockRow>,
    ) -> AppResult<Vec<StockRow>> {
        // Negative quantities and the all-or-nothing guarantee are enforced
        // inside the store's transaction
        self.uow.products().replace_stock(product_id, rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockProductRepository;
    use crate::services::tests::TestUow;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn stock_replace_passes_rows_through_unchanged() {
        let mut products = MockProductRepository::new();
        products
            .expect_replace_stock()
            .withf(|product_id, rows| *product_id == 1 && rows.len() == 2)
            .returning(|_, rows| Ok(rows));

        let mut uow = TestUow::default();
        uow.products = Arc::new(products);
        let service = ProductCatalog::new(Arc::new(uow));

        let rows = vec![
            StockRow {
                warehouse_id: 1,
                quantity: Decimal::from(5),
            },
            StockRow {
                warehouse_id: 2,
                quantity: Decimal::ZERO,
            },
        ];
        let result = service.replace_stock(1, rows).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn stock_replace_surfaces_store_rejection() {
        let mut products = MockProductRepository::new();
        products
            .expect_replace_stock()
            .returning(|_, _| Err(AppError::validation("Stock quantity cannot be negative")));

        let mut uow = TestUow::default();
        uow.products = Arc::new(products);
        let service = ProductCatalog::new(Arc::new(uow));

        let rows = vec![StockRow {
            warehouse_id: 1,
            quantity: Decimal::from(-1),
        }];
        let result = service.replace_stock(1, rows).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
