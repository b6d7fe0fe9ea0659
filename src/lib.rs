//! CRM backend with scoped visibility.
//!
//! A REST API for a small sales organization: managers with a three-role
//! hierarchy, counterparties, a goods and services catalog, sales with
//! derived totals, projects moving through funnels, sub-project Kanbans,
//! tasks and comments with attachments.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and authorization decisions
//! - **infra**: Infrastructure concerns (database, repositories, storage)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Actor, Password, Role};
pub use errors::{AppError, AppResult};
