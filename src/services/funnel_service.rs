//! Funnel service.
//!
//! Funnels and stages are shared pipeline structure, visible to every
//! authenticated manager; there is no ownership scoping here.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{Funnel, FunnelStage};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// A funnel with its stages in progression order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FunnelWithStages {
    pub id: i32,
    pub name: String,
    pub stages: Vec<FunnelStage>,
}

/// Funnel and stage use cases.
#[async_trait]
pub trait FunnelService: Send + Sync {
    async fn get(&self, id: i32) -> AppResult<FunnelWithStages>;

    async fn list(&self) -> AppResult<Vec<FunnelWithStages>>;

    async fn create(&self, name: String) -> AppResult<Funnel>;

    async fn update(&self, id: i32, name: String) -> AppResult<Funnel>;

    /// Cascades: stages go away and referencing projects are detached.
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// With no explicit order the stage is appended after the current last.
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

    async fn delete_stage(&self, stage_id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct FunnelDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FunnelDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn with_stages(&self, funnel: Funnel) -> AppResult<FunnelWithStages> {
        let stages = self.uow.funnels().stages(funnel.id).await?;
        Ok(FunnelWithStages {
            id: funnel.id,
            name: funnel.name,
            stages,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> FunnelService for FunnelDesk<U> {
    async fn get(&self, id: i32) -> AppResult<FunnelWithStages> {
        let funnel = self
            .uow
            .funnels()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.with_stages(funnel).await
    }

    async fn list(&self) -> AppResult<Vec<FunnelWithStages>> {
        let funnels = self.uow.funnels().list().await?;
        let mut result = Vec::with_capacity(funnels.len());
        for funnel in funnels {
            result.push(self.with_stages(funnel).await?);
        }
        Ok(result)
    }

    async fn create(&self, name: String) -> AppResult<Funnel> {
        self.uow.funnels().create(name).await
    }

    async fn update(&self, id: i32, name: String) -> AppResult<Funnel> {
        self.uow.funnels().update(id, name).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow.funnels().delete(id).await?;
        tracing::info!(funnel_id = id, "Funnel deleted with cascade");
        Ok(())
    }

    async fn create_stage(
        &self,
        funnel_id: i32,
        name: String,
        order: Option<i32>,
    ) -> AppResult<FunnelStage> {
        self.uow.funnels().create_stage(funnel_id, name, order).await
    }

    async fn update_stage(
        &self,
        stage_id: i32,
        name: Option<String>,
        order: Option<i32>,
    ) -> AppResult<FunnelStage> {
        self.uow.funnels().update_stage(stage_id, name, order).await
    }

    async fn delete_stage(&self, stage_id: i32) -> AppResult<()> {
        self.uow.funnels().delete_stage(stage_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockFunnelRepository;
    use crate::services::tests::TestUow;

    #[tokio::test]
    async fn stage_without_order_appends() {
        let mut funnels = MockFunnelRepository::new();
        funnels
            .expect_create_stage()
            .withf(|funnel_id, _, order| *funnel_id == 1 && order.is_none())
            .returning(|funnel_id, name, _| {
                Ok(FunnelStage {
                    id: 5,
                    funnel_id,
                    name,
                    order: 3,
                })
            });

        let mut uow = TestUow::default();
        uow.funnels = Arc::new(funnels);
        let service = FunnelDesk::new(Arc::new(uow));

        let stage = service
            .create_stage(1, "Closing".into(), None)
            .await
            .unwrap();
        assert_eq!(stage.order, 3);
    }

    #[tokio::test]
    async fn missing_funnel_is_not_found() {
        let mut funnels = MockFunnelRepository::new();
        funnels.expect_find_by_id().returning(|_| Ok(None));

        let mut uow = TestUow::default();
        uow.funnels = Arc::new(funnels);
        let service = FunnelDesk::new(Arc::new(uow));

        let result = service.get(42).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
