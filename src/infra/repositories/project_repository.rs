//! Project repository.
//!
//! Project visibility has the widest ownership shape: the main responsible
//! manager or any secondary responsible grants access, so scoped queries
//! resolve co-owned project ids from the join table first and fold them into
//! the filter.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::{project, project_manager, project_service};
use crate::domain::{
    next_service_quantity, CreateProject, Project, ProjectServiceLine, Scope, UpdateProject,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Project persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Project>>;

    /// Scoped by main responsible OR any secondary responsible.
    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Project>, u64)>;

    /// Ids of every project the scope can see; `None` means unrestricted.
    /// Used by sub-project queries, which inherit project visibility.
    async fn ids_visible_to(&self, scope: Scope) -> AppResult<Option<Vec<i32>>>;

    async fn create(&self, data: CreateProject) -> AppResult<Project>;

    async fn update(&self, id: i32, data: UpdateProject) -> AppResult<Project>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Move the project to a stage, re-pointing its funnel to the stage's
    /// funnel in the same update.
    async fn set_stage(&self, id: i32, stage_id: i32, funnel_id: i32) -> AppResult<Project>;

    /// Add a service to the aggregated list. First add stores quantity 1.0;
    /// a duplicate add increments the stored quantity by 0.1.
    async fn add_service(&self, id: i32, service_id: i32) -> AppResult<Project>;

    async fn remove_service(&self, id: i32, service_id: i32) -> AppResult<Project>;
}

/// SeaORM-backed project store.
pub struct ProjectStore {
    db: DatabaseConnection,
}

impl ProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble<C: ConnectionTrait>(conn: &C, model: project::Model) -> AppResult<Project> {
        let secondaries = project_manager::Entity::find()
            .filter(project_manager::Column::ProjectId.eq(model.id))
            .all(conn)
            .await?;
        let services = load_service_lines(conn, model.id).await?;

        Ok(Project {
            id: model.id,
            name: model.name,
            forecast_amount: model.forecast_amount,
            counterparty_id: model.counterparty_id,
            main_responsible_manager_id: model.main_responsible_manager_id,
            secondary_responsible_manager_ids: secondaries
                .into_iter()
                .map(|e| e.manager_id)
                .collect(),
            funnel_id: model.funnel_id,
            funnel_stage_id: model.funnel_stage_id,
            services,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Project ids where any manager in `ids` is a secondary responsible.
    async fn co_owned_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let edges = project_manager::Entity::find()
            .filter(project_manager::Column::ManagerId.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(edges.into_iter().map(|e| e.project_id).collect())
    }

    fn scope_condition(scope_ids: Vec<i32>, co_owned: Vec<i32>) -> Condition {
        Condition::any()
            .add(project::Column::MainResponsibleManagerId.is_in(scope_ids))
            .add(project::Column::Id.is_in(co_owned))
    }
}

async fn load_service_lines<C: ConnectionTrait>(
    conn: &C,
    project_id: i32,
) -> AppResult<Vec<ProjectServiceLine>> {
    let rows = project_service::Entity::find()
        .filter(project_service::Column::ProjectId.eq(project_id))
        .find_also_related(super::entities::service_item::Entity)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(line, service)| {
            let (name, price) = service
                .map(|s| (s.name, s.price))
                .unwrap_or_else(|| (String::new(), Decimal::ZERO));
            ProjectServiceLine {
                service_id: line.service_id,
                service_name: name,
                price,
                quantity: line.quantity,
            }
        })
        .collect())
}

#[async_trait]
impl ProjectRepository for ProjectStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Project>> {
        let model = project::Entity::find_by_id(id).one(&self.db).await?;
        match model {
            Some(m) => Ok(Some(Self::assemble(&self.db, m).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Project>, u64)> {
        let mut query = project::Entity::find().order_by_asc(project::Column::Id);
        if let Some(ids) = scope.ids() {
            let scope_ids: Vec<i32> = ids.iter().copied().collect();
            let co_owned = self.co_owned_ids(&scope_ids).await?;
            query = query.filter(Self::scope_condition(scope_ids, co_owned));
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        let mut projects = Vec::with_capacity(models.len());
        for model in models {
            projects.push(Self::assemble(&self.db, model).await?);
        }
        Ok((projects, total))
    }

    async fn ids_visible_to(&self, scope: Scope) -> AppResult<Option<Vec<i32>>> {
        let Some(ids) = scope.ids() else {
            return Ok(None);
        };
        let scope_ids: Vec<i32> = ids.iter().copied().collect();
        let co_owned = self.co_owned_ids(&scope_ids).await?;

        let models = project::Entity::find()
            .filter(Self::scope_condition(scope_ids, co_owned))
            .all(&self.db)
            .await?;
        Ok(Some(models.into_iter().map(|m| m.id).collect()))
    }

    async fn create(&self, data: CreateProject) -> AppResult<Project> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = project::ActiveModel {
            name: Set(data.name),
            forecast_amount: Set(data.forecast_amount),
            counterparty_id: Set(data.counterparty_id),
            main_responsible_manager_id: Set(data.main_responsible_manager_id),
            funnel_id: Set(data.funnel_id),
            funnel_stage_id: Set(data.funnel_stage_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for manager_id in &data.secondary_responsible_manager_ids {
            project_manager::ActiveModel {
                project_id: Set(model.id),
                manager_id: Set(*manager_id),
            }
            .insert(&txn)
            .await?;
        }

        let created = Self::assemble(&txn, model).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i32, data: UpdateProject) -> AppResult<Project> {
        let txn = self.db.begin().await?;

        let model = project::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: project::ActiveModel = model.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(forecast) = data.forecast_amount {
            active.forecast_amount = Set(forecast);
        }
        if let Some(counterparty_id) = data.counterparty_id {
            active.counterparty_id = Set(counterparty_id);
        }
        if let Some(main) = data.main_responsible_manager_id {
            active.main_responsible_manager_id = Set(main);
        }
        if let Some(funnel_id) = data.funnel_id {
            active.funnel_id = Set(funnel_id);
        }
        if let Some(stage_id) = data.funnel_stage_id {
            active.funnel_stage_id = Set(stage_id);
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        if let Some(secondaries) = &data.secondary_responsible_manager_ids {
            project_manager::Entity::delete_many()
                .filter(project_manager::Column::ProjectId.eq(id))
                .exec(&txn)
                .await?;
            for manager_id in secondaries {
                project_manager::ActiveModel {
                    project_id: Set(id),
                    manager_id: Set(*manager_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        let updated = Self::assemble(&txn, model).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = project::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn set_stage(&self, id: i32, stage_id: i32, funnel_id: i32) -> AppResult<Project> {
        let model = project::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: project::ActiveModel = model.into();
        active.funnel_stage_id = Set(Some(stage_id));
        active.funnel_id = Set(Some(funnel_id));
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Self::assemble(&self.db, model).await
    }

    async fn add_service(&self, id: i32, service_id: i32) -> AppResult<Project> {
        let txn = self.db.begin().await?;

        let model = project::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let existing = project_service::Entity::find_by_id((id, service_id))
            .one(&txn)
            .await?;

        match existing {
            Some(row) => {
                let quantity = next_service_quantity(Some(row.quantity));
                let mut active: project_service::ActiveModel = row.into();
                active.quantity = Set(quantity);
                active.update(&txn).await?;
            }
            None => {
                project_service::ActiveModel {
                    project_id: Set(id),
                    service_id: Set(service_id),
                    quantity: Set(next_service_quantity(None)),
                }
                .insert(&txn)
                .await?;
            }
        }

        let updated = Self::assemble(&txn, model).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn remove_service(&self, id: i32, service_id: i32) -> AppResult<Project> {
        let model = project::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let result = project_service::Entity::delete_by_id((id, service_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Self::assemble(&self.db, model).await
    }
}
