//! Counterparty repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use super::entities::counterparty;
use super::scope_filter;
use crate::domain::{Counterparty, CounterpartyKind, CreateCounterparty, Scope, UpdateCounterparty};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Counterparty persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CounterpartyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Counterparty>>;

    /// Scoped by `responsible_manager_id`.
    async fn list(
        &self,
        scope: Scope,
        page: PaginationParams,
    ) -> AppResult<(Vec<Counterparty>, u64)>;

    async fn create(&self, data: CreateCounterparty) -> AppResult<Counterparty>;

    async fn update(&self, id: i32, data: UpdateCounterparty) -> AppResult<Counterparty>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed counterparty store.
pub struct CounterpartyStore {
    db: DatabaseConnection,
}

impl CounterpartyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: counterparty::Model) -> Counterparty {
    Counterparty {
        id: model.id,
        name: model.name,
        kind: CounterpartyKind::from(model.kind.as_str()),
        responsible_manager_id: model.responsible_manager_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl CounterpartyRepository for CounterpartyStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Counterparty>> {
        let model = counterparty::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(to_domain))
    }

    async fn list(
        &self,
        scope: Scope,
        page: PaginationParams,
    ) -> AppResult<(Vec<Counterparty>, u64)> {
        let mut query = counterparty::Entity::find().order_by_asc(counterparty::Column::Id);
        if let Some(cond) = scope_filter(&scope, counterparty::Column::ResponsibleManagerId) {
            query = query.filter(cond);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }

    async fn create(&self, data: CreateCounterparty) -> AppResult<Counterparty> {
        let now = Utc::now();
        let model = counterparty::ActiveModel {
            name: Set(data.name),
            kind: Set(data.kind.as_str().to_string()),
            responsible_manager_id: Set(data.responsible_manager_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(to_domain(model))
    }

    async fn update(&self, id: i32, data: UpdateCounterparty) -> AppResult<Counterparty> {
        let model = counterparty::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: counterparty::ActiveModel = model.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(kind) = data.kind {
            active.kind = Set(kind.as_str().to_string());
        }
        if let Some(responsible) = data.responsible_manager_id {
            active.responsible_manager_id = Set(responsible);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = counterparty::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
