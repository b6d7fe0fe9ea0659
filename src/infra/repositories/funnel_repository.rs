//! Funnel and stage repository.
//!
//! Deleting a funnel or a stage must never leave a project pointing at a
//! dead pipeline row, so both deletes clear the referencing project columns
//! inside the same transaction.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::entities::{funnel, funnel_stage, project};
use crate::domain::{append_order, Funnel, FunnelStage};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Funnel and stage persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FunnelRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Funnel>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Funnel>>;

    async fn create(&self, name: String) -> AppResult<Funnel>;

    async fn update(&self, id: i32, name: String) -> AppResult<Funnel>;

    /// Delete a funnel, its stages, and any project references to either,
    /// all in one transaction.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Stages of a funnel in progression order.
    async fn stages(&self, funnel_id: i32) -> AppResult<Vec<FunnelStage>>;

    async fn find_stage(&self, stage_id: i32) -> AppResult<Option<FunnelStage>>;

    /// Add a stage; with no explicit order it lands at the end of the
    /// funnel's progression.
    async fn create_stage(
        &self,
        funnel_id: i32,
        name: String,
        order: Option<i32>,
    ) -> AppResult<FunnelStage>;

    async fn update_stage(
        &self,
        stage_id: i32,
        name: Option<String>,
        order: Option<i32>,
    ) -> AppResult<FunnelStage>;

    /// Delete a stage, clearing any project references to it first.
    async fn delete_stage(&self, stage_id: i32) -> AppResult<()>;
}

/// SeaORM-backed funnel store.
pub struct FunnelStore {
    db: DatabaseConnection,
}

impl FunnelStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn funnel_to_domain(model: funnel::Model) -> Funnel {
    Funnel {
        id: model.id,
        name: model.name,
    }
}

fn stage_to_domain(model: funnel_stage::Model) -> FunnelStage {
    FunnelStage {
        id: model.id,
        funnel_id: model.funnel_id,
        name: model.name,
        order: model.order,
    }
}

#[async_trait]
impl FunnelRepository for FunnelStore {
    async fn list(&self) -> AppResult<Vec<Funnel>> {
        let models = funnel::Entity::find()
            .order_by_asc(funnel::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(funnel_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Funnel>> {
        let model = funnel::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(funnel_to_domain))
    }

    async fn create(&self, name: String) -> AppResult<Funnel> {
        let model = funnel::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(funnel_to_domain(model))
    }

    async fn update(&self, id: i32, name: String) -> AppResult<Funnel> {
        let model = funnel::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: funnel::ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await?;
        Ok(funnel_to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        funnel::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        // Detach every project on this pipeline before the rows go away
        project::Entity::update_many()
            .col_expr(project::Column::FunnelId, Expr::value(Option::<i32>::None))
            .col_expr(
                project::Column::FunnelStageId,
                Expr::value(Option::<i32>::None),
            )
            .filter(project::Column::FunnelId.eq(id))
            .exec(&txn)
            .await?;

        funnel_stage::Entity::delete_many()
            .filter(funnel_stage::Column::FunnelId.eq(id))
            .exec(&txn)
            .await?;

        funnel::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn stages(&self, funnel_id: i32) -> AppResult<Vec<FunnelStage>> {
        let models = funnel_stage::Entity::find()
            .filter(funnel_stage::Column::FunnelId.eq(funnel_id))
            .order_by_asc(funnel_stage::Column::Order)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(stage_to_domain).collect())
    }

    async fn find_stage(&self, stage_id: i32) -> AppResult<Option<FunnelStage>> {
        let model = funnel_stage::Entity::find_by_id(stage_id).one(&self.db).await?;
        Ok(model.map(stage_to_domain))
    }

    async fn create_stage(
        &self,
        funnel_id: i32,
        name: String,
        order: Option<i32>,
    ) -> AppResult<FunnelStage> {
        let txn = self.db.begin().await?;

        funnel::Entity::find_by_id(funnel_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let order = match order {
            Some(o) => o,
            None => {
                let max_order = funnel_stage::Entity::find()
                    .filter(funnel_stage::Column::FunnelId.eq(funnel_id))
                    .order_by_desc(funnel_stage::Column::Order)
                    .limit(1)
                    .one(&txn)
                    .await?
                    .map(|s| s.order);
                append_order(max_order)
            }
        };

        let model = funnel_stage::ActiveModel {
            funnel_id: Set(funnel_id),
            name: Set(name),
            order: Set(order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(stage_to_domain(model))
    }

    async fn update_stage(
        &self,
        stage_id: i32,
        name: Option<String>,
        order: Option<i32>,
    ) -> AppResult<FunnelStage> {
        let model = funnel_stage::Entity::find_by_id(stage_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: funnel_stage::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(order) = order {
            active.order = Set(order);
        }

        let model = active.update(&self.db).await?;
        Ok(stage_to_domain(model))
    }

    async fn delete_stage(&self, stage_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        funnel_stage::Entity::find_by_id(stage_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        // Projects sitting on the stage stay in the funnel, off-board
        project::Entity::update_many()
            .col_expr(
                project::Column::FunnelStageId,
                Expr::value(Option::<i32>::None),
            )
            .filter(project::Column::FunnelStageId.eq(stage_id))
            .exec(&txn)
            .await?;

        funnel_stage::Entity::delete_by_id(stage_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
