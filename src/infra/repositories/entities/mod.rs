//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod counterparty;
pub mod funnel;
pub mod funnel_stage;
pub mod manager;
pub mod manager_supervisor;
pub mod product;
pub mod product_stock;
pub mod project;
pub mod project_comment;
pub mod project_manager;
pub mod project_service;
pub mod sale;
pub mod sale_product;
pub mod sale_service;
pub mod service_item;
pub mod subproject;
pub mod subproject_comment;
pub mod subproject_status;
pub mod task;
pub mod unit;
pub mod warehouse;
