//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod comment_handler;
pub mod counterparty_handler;
pub mod funnel_handler;
pub mod manager_handler;
pub mod product_handler;
pub mod project_handler;
pub mod sale_handler;
pub mod subproject_handler;
pub mod task_handler;
pub mod upload_handler;

pub use auth_handler::{auth_routes, me_routes};
pub use catalog_handler::{
    service_routes, subproject_status_routes, unit_routes, warehouse_routes,
};
pub use comment_handler::comment_routes;
pub use counterparty_handler::counterparty_routes;
pub use funnel_handler::{funnel_routes, stage_routes};
pub use manager_handler::manager_routes;
pub use product_handler::product_routes;
pub use project_handler::project_routes;
pub use sale_handler::sale_routes;
pub use subproject_handler::subproject_routes;
pub use task_handler::task_routes;
pub use upload_handler::upload_routes;

use serde::{Deserialize, Deserializer};

/// Deserialize an `Option<Option<T>>` field so an absent key stays `None`
/// while an explicit `null` becomes `Some(None)`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// update requests, where `null` means "clear this field".
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
