//! Sale service.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, CreateSale, Sale, UpdateSale};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Sale use cases.
#[async_trait]
pub trait SaleService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Sale>;

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Sale>>;

    async fn create(&self, actor: Actor, data: CreateSale) -> AppResult<Sale>;

    async fn update(&self, actor: Actor, id: i32, data: UpdateSale) -> AppResult<Sale>;

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct SaleDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SaleDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn visible(&self, actor: Actor, id: i32) -> AppResult<Sale> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let sale = self
            .uow
            .sales()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !scope.includes(sale.responsible_manager_id) {
            return Err(AppError::NotFound);
        }
        Ok(sale)
    }
}

#[async_trait]
impl<U: UnitOfWork> SaleService for SaleDesk<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Sale> {
        self.visible(actor, id).await
    }

    async fn list(&self, actor: Actor, page: PaginationParams) -> AppResult<Paginated<Sale>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let (sales, total) = self.uow.sales().list(scope, page).await?;
        Ok(Paginated::new(sales, page, total))
    }

    async fn create(&self, actor: Actor, mut data: CreateSale) -> AppResult<Sale> {
        // A sale has to belong to an existing counterparty
        self.uow
            .counterparties()
            .find_by_id(data.counterparty_id)
            .await?
            .ok_or_else(|| AppError::validation("Unknown counterparty"))?;

        if data.responsible_manager_id.is_none() && !actor.is_admin() {
            data.responsible_manager_id = Some(actor.id);
        }
        self.uow.sales().create(data).await
    }

    async fn update(&self, actor: Actor, id: i32, data: UpdateSale) -> AppResult<Sale> {
        self.visible(actor, id).await?;

        if let Some(counterparty_id) = data.counterparty_id {
            self.uow
                .counterparties()
                .find_by_id(counterparty_id)
                .await?
                .ok_or_else(|| AppError::validation("Unknown counterparty"))?;
        }
        self.uow.sales().update(id, data).await
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        self.visible(actor, id).await?;
        self.uow.sales().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::repositories::{MockCounterpartyRepository, MockSaleRepository};
    use crate::services::tests::{sale, TestUow};
    use chrono::NaiveDate;

    fn create_data(counterparty_id: i32) -> CreateSale {
        CreateSale {
            counterparty_id,
            responsible_manager_id: None,
            sale_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            status: "new".into(),
            deferred_payment_date: None,
            project_id: None,
            products: vec![],
            services: vec![],
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_counterparty() {
        let mut counterparties = MockCounterpartyRepository::new();
        counterparties.expect_find_by_id().returning(|_| Ok(None));

        let mut uow = TestUow::default();
        uow.counterparties = Arc::new(counterparties);
        let service = SaleDesk::new(Arc::new(uow));

        let result = service
            .create(Actor::new(3, Role::Manager), create_data(99))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn out_of_scope_sale_reads_as_not_found() {
        let mut sales = MockSaleRepository::new();
        sales
            .expect_find_by_id()
            .returning(|id| Ok(Some(sale(id, Some(7)))));

        let mut uow = TestUow::default();
        uow.sales = Arc::new(sales);
        let service = SaleDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(3, Role::Manager), 5).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn admin_sees_any_sale() {
        let mut sales = MockSaleRepository::new();
        sales
            .expect_find_by_id()
            .returning(|id| Ok(Some(sale(id, Some(7)))));

        let mut uow = TestUow::default();
        uow.sales = Arc::new(sales);
        let service = SaleDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(1, Role::Admin), 5).await;
        assert!(result.is_ok());
    }
}
