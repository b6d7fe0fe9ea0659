//! Counterparty service.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, Counterparty, CreateCounterparty, UpdateCounterparty};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Counterparty use cases.
#[async_trait]
pub trait CounterpartyService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Counterparty>;

    async fn list(
        &self,
        actor: Actor,
        page: PaginationParams,
    ) -> AppResult<Paginated<Counterparty>>;

    async fn create(&self, actor: Actor, data: CreateCounterparty) -> AppResult<Counterparty>;

    async fn update(
        &self,
        actor: Actor,
        id: i32,
        data: UpdateCounterparty,
    ) -> AppResult<Counterparty>;

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct CounterpartyDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CounterpartyDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Fetch with existence hiding: out-of-scope records read as missing.
    async fn visible(&self, actor: Actor, id: i32) -> AppResult<Counterparty> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let counterparty = self
            .uow
            .counterparties()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !scope.includes(counterparty.responsible_manager_id) {
            return Err(AppError::NotFound);
        }
        Ok(counterparty)
    }
}

#[async_trait]
impl<U: UnitOfWork> CounterpartyService for CounterpartyDesk<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<Counterparty> {
        self.visible(actor, id).await
    }

    async fn list(
        &self,
        actor: Actor,
        page: PaginationParams,
    ) -> AppResult<Paginated<Counterparty>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let (counterparties, total) = self.uow.counterparties().list(scope, page).await?;
        Ok(Paginated::new(counterparties, page, total))
    }

    async fn create(&self, actor: Actor, mut data: CreateCounterparty) -> AppResult<Counterparty> {
        // Unowned records would be invisible to the creator, so default the
        // responsible manager to the requester
        if data.responsible_manager_id.is_none() && !actor.is_admin() {
            data.responsible_manager_id = Some(actor.id);
        }
        self.uow.counterparties().create(data).await
    }

    async fn update(
        &self,
        actor: Actor,
        id: i32,
        data: UpdateCounterparty,
    ) -> AppResult<Counterparty> {
        self.visible(actor, id).await?;
        self.uow.counterparties().update(id, data).await
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        self.visible(actor, id).await?;
        self.uow.counterparties().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CounterpartyKind, Role};
    use crate::infra::repositories::{MockCounterpartyRepository, MockManagerRepository};
    use crate::services::tests::{counterparty, TestUow};

    #[tokio::test]
    async fn out_of_scope_counterparty_reads_as_not_found() {
        let mut counterparties = MockCounterpartyRepository::new();
        counterparties
            .expect_find_by_id()
            .returning(|id| Ok(Some(counterparty(id, Some(7)))));

        let mut uow = TestUow::default();
        uow.counterparties = Arc::new(counterparties);
        let service = CounterpartyDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(3, Role::Manager), 10).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn head_sees_direct_reports_counterparty() {
        let mut counterparties = MockCounterpartyRepository::new();
        counterparties
            .expect_find_by_id()
            .returning(|id| Ok(Some(counterparty(id, Some(3)))));

        let mut managers = MockManagerRepository::new();
        managers
            .expect_subordinate_ids()
            .returning(|_| Ok(vec![3]));

        let mut uow = TestUow::default();
        uow.counterparties = Arc::new(counterparties);
        uow.managers = Arc::new(managers);
        let service = CounterpartyDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(2, Role::Head), 10).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn ownerless_counterparty_hidden_from_non_admins() {
        let mut counterparties = MockCounterpartyRepository::new();
        counterparties
            .expect_find_by_id()
            .returning(|id| Ok(Some(counterparty(id, None))));

        let mut uow = TestUow::default();
        uow.counterparties = Arc::new(counterparties);
        let service = CounterpartyDesk::new(Arc::new(uow));

        let result = service.get(Actor::new(3, Role::Manager), 10).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn create_defaults_owner_to_requester() {
        let mut counterparties = MockCounterpartyRepository::new();
        counterparties
            .expect_create()
            .withf(|data| data.responsible_manager_id == Some(3))
            .returning(|data| {
                let mut cp = counterparty(1, data.responsible_manager_id);
                cp.name = data.name.clone();
                Ok(cp)
            });

        let mut uow = TestUow::default();
        uow.counterparties = Arc::new(counterparties);
        let service = CounterpartyDesk::new(Arc::new(uow));

        let result = service
            .create(
                Actor::new(3, Role::Manager),
                CreateCounterparty {
                    name: "Acme GmbH".into(),
                    kind: CounterpartyKind::LegalEntity,
                    responsible_manager_id: None,
                },
            )
            .await;
        assert!(result.is_ok());
    }
}
