//! Manager repository: accounts, roles and the supervisor adjacency.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::{manager, manager_supervisor};
use super::scope_filter;
use crate::domain::{CreateManager, Manager, Role, Scope, UpdateManager};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Manager persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Manager>>;

    /// Lookup by email; emails are stored lowercased.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Manager>>;

    /// Scoped listing: a manager only appears if their own id is in scope.
    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Manager>, u64)>;

    async fn create(&self, data: CreateManager) -> AppResult<Manager>;

    async fn update(&self, id: i32, data: UpdateManager) -> AppResult<Manager>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Managers whose supervisor set contains `manager_id` (direct reports,
    /// one hop only).
    async fn subordinate_ids(&self, manager_id: i32) -> AppResult<Vec<i32>>;
}

/// SeaORM-backed manager store.
pub struct ManagerStore {
    db: DatabaseConnection,
}

impl ManagerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn supervisors_of(&self, manager_id: i32) -> AppResult<Vec<i32>> {
        let edges = manager_supervisor::Entity::find()
            .filter(manager_supervisor::Column::ManagerId.eq(manager_id))
            .all(&self.db)
            .await?;
        Ok(edges.into_iter().map(|e| e.supervisor_id).collect())
    }

    async fn to_domain(&self, model: manager::Model) -> AppResult<Manager> {
        let supervisor_ids = self.supervisors_of(model.id).await?;
        Ok(Manager {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role: Role::from(model.role.as_str()),
            supervisor_ids,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl ManagerRepository for ManagerStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Manager>> {
        let model = manager::Entity::find_by_id(id).one(&self.db).await?;
        match model {
            Some(m) => Ok(Some(self.to_domain(m).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Manager>> {
        let model = manager::Entity::find()
            .filter(manager::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await?;
        match model {
            Some(m) => Ok(Some(self.to_domain(m).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Manager>, u64)> {
        let mut query = manager::Entity::find().order_by_asc(manager::Column::Id);
        if let Some(cond) = scope_filter(&scope, manager::Column::Id) {
            query = query.filter(cond);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        let mut managers = Vec::with_capacity(models.len());
        for model in models {
            managers.push(self.to_domain(model).await?);
        }
        Ok((managers, total))
    }

    async fn create(&self, data: CreateManager) -> AppResult<Manager> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = manager::ActiveModel {
            email: Set(data.email.to_lowercase()),
            password_hash: Set(data.password_hash),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            role: Set(data.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for supervisor_id in &data.supervisor_ids {
            manager_supervisor::ActiveModel {
                manager_id: Set(model.id),
                supervisor_id: Set(*supervisor_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(Manager {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            role: Role::from(model.role.as_str()),
            supervisor_ids: data.supervisor_ids,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn update(&self, id: i32, data: UpdateManager) -> AppResult<Manager> {
        let txn = self.db.begin().await?;

        let model = manager::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: manager::ActiveModel = model.into();
        if let Some(first_name) = data.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = data.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(role) = data.role {
            active.role = Set(role.to_string());
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        // Replace the supervisor set wholesale when provided
        if let Some(supervisor_ids) = &data.supervisor_ids {
            manager_supervisor::Entity::delete_many()
                .filter(manager_supervisor::Column::ManagerId.eq(id))
                .exec(&txn)
                .await?;
            for supervisor_id in supervisor_ids {
                manager_supervisor::ActiveModel {
                    manager_id: Set(id),
                    supervisor_id: Set(*supervisor_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        self.to_domain(model).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = manager::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn subordinate_ids(&self, manager_id: i32) -> AppResult<Vec<i32>> {
        let edges = manager_supervisor::Entity::find()
            .filter(manager_supervisor::Column::SupervisorId.eq(manager_id))
            .all(&self.db)
            .await?;
        Ok(edges.into_iter().map(|e| e.manager_id).collect())
    }
}
