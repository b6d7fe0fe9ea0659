//! Sub-project repository.
//!
//! Sub-projects have no owner column of their own; every scoped query takes
//! the caller's visible project ids, resolved upstream through the project
//! repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::subproject;
use crate::domain::{CreateSubProject, SubProject, UpdateSubProject};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Sub-project persistence operations. `visible_projects` of `None` means
/// an unrestricted caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<SubProject>>;

    async fn list(
        &self,
        visible_projects: Option<Vec<i32>>,
        page: PaginationParams,
    ) -> AppResult<(Vec<SubProject>, u64)>;

    /// All sub-projects of one project, unpaginated. Used for board views
    /// and project cost aggregation.
    async fn list_for_project(&self, project_id: i32) -> AppResult<Vec<SubProject>>;

    async fn create(&self, data: CreateSubProject) -> AppResult<SubProject>;

    async fn update(&self, id: i32, data: UpdateSubProject) -> AppResult<SubProject>;

    async fn set_status(&self, id: i32, status: String) -> AppResult<SubProject>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed sub-project store.
pub struct SubProjectStore {
    db: DatabaseConnection,
}

impl SubProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: subproject::Model) -> SubProject {
    SubProject {
        id: model.id,
        name: model.name,
        cost: model.cost,
        status: model.status,
        project_id: model.project_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl SubProjectRepository for SubProjectStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<SubProject>> {
        let model = subproject::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(to_domain))
    }

    async fn list(
        &self,
        visible_projects: Option<Vec<i32>>,
        page: PaginationParams,
    ) -> AppResult<(Vec<SubProject>, u64)> {
        let mut query = subproject::Entity::find().order_by_asc(subproject::Column::Id);
        if let Some(project_ids) = visible_projects {
            query = query.filter(subproject::Column::ProjectId.is_in(project_ids));
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }

    async fn list_for_project(&self, project_id: i32) -> AppResult<Vec<SubProject>> {
        let models = subproject::Entity::find()
            .filter(subproject::Column::ProjectId.eq(project_id))
            .order_by_asc(subproject::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn create(&self, data: CreateSubProject) -> AppResult<SubProject> {
        let now = Utc::now();
        let model = subproject::ActiveModel {
            name: Set(data.name),
            cost: Set(data.cost),
            status: Set(data.status),
            project_id: Set(data.project_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_domain(model))
    }

    async fn update(&self, id: i32, data: UpdateSubProject) -> AppResult<SubProject> {
        let model = subproject::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: subproject::ActiveModel = model.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(cost) = data.cost {
            active.cost = Set(cost);
        }
        if let Some(status) = data.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn set_status(&self, id: i32, status: String) -> AppResult<SubProject> {
        let model = subproject::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: subproject::ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(to_domain(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = subproject::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
