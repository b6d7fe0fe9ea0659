//! Manager service: account administration and scoped directory reads.
//!
//! Mutations are admin-only. Reads go through the visibility scope: a
//! manager sees themselves, a head sees themselves plus direct reports.

use async_trait::async_trait;
use std::sync::Arc;

use super::resolve_scope;
use crate::domain::{Actor, ManagerResponse, Password, Role, UpdateManager};
use crate::domain::CreateManager;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Manager account creation input; the password arrives in the clear and is
/// hashed here.
#[derive(Debug, Clone)]
pub struct NewManager {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub supervisor_ids: Vec<i32>,
}

/// Manager use cases.
#[async_trait]
pub trait ManagerService: Send + Sync {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<ManagerResponse>;

    async fn list(
        &self,
        actor: Actor,
        page: PaginationParams,
    ) -> AppResult<Paginated<ManagerResponse>>;

    /// Admin only.
    async fn create(&self, actor: Actor, data: NewManager) -> AppResult<ManagerResponse>;

    /// Admin only.
    async fn update(&self, actor: Actor, id: i32, data: UpdateManager)
        -> AppResult<ManagerResponse>;

    /// Admin only.
    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()>;
}

/// Concrete implementation over the Unit of Work.
pub struct ManagerDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ManagerDirectory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn require_admin(actor: Actor) -> AppResult<()> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> ManagerService for ManagerDirectory<U> {
    async fn get(&self, actor: Actor, id: i32) -> AppResult<ManagerResponse> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let manager = self
            .uow
            .managers()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Out-of-scope accounts are indistinguishable from missing ones
        if !scope.includes(Some(manager.id)) {
            return Err(AppError::NotFound);
        }
        Ok(ManagerResponse::from(manager))
    }

    async fn list(
        &self,
        actor: Actor,
        page: PaginationParams,
    ) -> AppResult<Paginated<ManagerResponse>> {
        let scope = resolve_scope(self.uow.as_ref(), actor).await?;
        let (managers, total) = self.uow.managers().list(scope, page).await?;
        Ok(Paginated::new(
            managers.into_iter().map(ManagerResponse::from).collect(),
            page,
            total,
        ))
    }

    async fn create(&self, actor: Actor, data: NewManager) -> AppResult<ManagerResponse> {
        Self::require_admin(actor)?;

        let email = data.email.to_lowercase();
        if self.uow.managers().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Manager"));
        }

        let password_hash = Password::new(&data.password)?.into_string();
        let manager = self
            .uow
            .managers()
            .create(CreateManager {
                email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                role: data.role,
                supervisor_ids: data.supervisor_ids,
            })
            .await?;

        tracing::info!(manager_id = manager.id, "Manager account created");
        Ok(ManagerResponse::from(manager))
    }

    async fn update(
        &self,
        actor: Actor,
        id: i32,
        data: UpdateManager,
    ) -> AppResult<ManagerResponse> {
        Self::require_admin(actor)?;
        let manager = self.uow.managers().update(id, data).await?;
        Ok(ManagerResponse::from(manager))
    }

    async fn delete(&self, actor: Actor, id: i32) -> AppResult<()> {
        Self::require_admin(actor)?;
        self.uow.managers().delete(id).await?;
        tracing::info!(manager_id = id, "Manager account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockManagerRepository;
    use crate::services::tests::uow_with_managers;

    fn actor(id: i32, role: Role) -> Actor {
        Actor::new(id, role)
    }

    #[tokio::test]
    async fn non_admin_cannot_create() {
        let uow = uow_with_managers(MockManagerRepository::new());
        let service = ManagerDirectory::new(Arc::new(uow));

        let result = service
            .create(
                actor(5, Role::Head),
                NewManager {
                    email: "new@example.com".into(),
                    password: "password123".into(),
                    first_name: "New".into(),
                    last_name: "Hire".into(),
                    role: Role::Manager,
                    supervisor_ids: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn out_of_scope_manager_reads_as_not_found() {
        let mut managers = MockManagerRepository::new();
        managers
            .expect_find_by_id()
            .returning(|id| Ok(Some(crate::services::tests::manager(id, Role::Manager, vec![]))));
        let uow = uow_with_managers(managers);
        let service = ManagerDirectory::new(Arc::new(uow));

        // Manager 3 asking about manager 4
        let result = service.get(actor(3, Role::Manager), 4).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn manager_can_read_self() {
        let mut managers = MockManagerRepository::new();
        managers
            .expect_find_by_id()
            .returning(|id| Ok(Some(crate::services::tests::manager(id, Role::Manager, vec![]))));
        let uow = uow_with_managers(managers);
        let service = ManagerDirectory::new(Arc::new(uow));

        let result = service.get(actor(3, Role::Manager), 3).await;
        assert!(result.is_ok());
    }
}
