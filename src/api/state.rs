//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Application state handed to every handler.
///
/// Carries the service container plus the raw database handle for the
/// health endpoint.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub database: Arc<Database>,
    /// Request body cap for the upload endpoint
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let max_upload_bytes = config.max_upload_size_bytes();
        let container = Arc::new(Services::from_connection(
            database.get_connection(),
            config,
        ));

        Self {
            services: container,
            database,
            max_upload_bytes,
        }
    }

    /// Create application state with a manually injected container.
    ///
    /// Used by tests to swap in mock services.
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self {
            services,
            database,
            max_upload_bytes: crate::config::DEFAULT_MAX_UPLOAD_SIZE_MB as usize * 1024 * 1024,
        }
    }
}
