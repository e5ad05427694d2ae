//! Application state - dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserStore};
use crate::services::{Authenticator, AuthService, PasswordProcessor, UserManager, UserService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::new(repo.clone(), config.clone()));
        let user_service = Arc::new(UserManager::new(
            repo,
            PasswordProcessor::new(),
            config.trim_identity,
        ));

        Self {
            auth_service,
            user_service,
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            database,
        }
    }
}
