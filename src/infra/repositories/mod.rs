//! Repository layer - data access abstraction.
//!
//! Each repository pairs a trait (for dependency injection and mocking) with
//! a SeaORM-backed store. Scoped list queries translate the visibility
//! [`Scope`](crate::domain::Scope) into SQL conditions; `None` from
//! [`scope_filter`] means the query runs unrestricted.

pub(crate) mod entities;

mod catalog_repository;
mod comment_repository;
mod counterparty_repository;
mod funnel_repository;
mod manager_repository;
mod product_repository;
mod project_repository;
mod sale_repository;
mod subproject_repository;
mod task_repository;

pub use catalog_repository::{
    CatalogStore, ServiceItemRepository, SubProjectStatusRepository, UnitRepository,
    WarehouseRepository,
};
pub use comment_repository::{CommentRepository, CommentStore, CommentScope};
pub use counterparty_repository::{CounterpartyRepository, CounterpartyStore};
pub use funnel_repository::{FunnelRepository, FunnelStore};
pub use manager_repository::{ManagerRepository, ManagerStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use project_repository::{ProjectRepository, ProjectStore};
pub use sale_repository::{SaleRepository, SaleStore};
pub use subproject_repository::{SubProjectRepository, SubProjectStore};
pub use task_repository::{TaskRepository, TaskStore};

#[cfg(test)]
pub use catalog_repository::{
    MockServiceItemRepository, MockSubProjectStatusRepository, MockUnitRepository,
    MockWarehouseRepository,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use counterparty_repository::MockCounterpartyRepository;
#[cfg(test)]
pub use funnel_repository::MockFunnelRepository;
#[cfg(test)]
pub use manager_repository::MockManagerRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use sale_repository::MockSaleRepository;
#[cfg(test)]
pub use subproject_repository::MockSubProjectRepository;
#[cfg(test)]
pub use task_repository::MockTaskRepository;

use sea_orm::{ColumnTrait, Condition};

use crate::domain::Scope;

/// Build a single-owner-column filter from a scope.
///
/// Returns `None` for an unrestricted (admin) scope. A `NULL` owner never
/// matches `IS IN`, so ownerless records drop out for non-admins, as the
/// visibility model requires.
pub(crate) fn scope_filter<C: ColumnTrait>(scope: &Scope, owner_col: C) -> Option<Condition> {
    scope
        .ids()
        .map(|ids| Condition::all().add(owner_col.is_in(ids.iter().copied().collect::<Vec<_>>())))
}
