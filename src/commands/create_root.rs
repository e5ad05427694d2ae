//! Create-root command - bootstraps the privileged account.
//!
//! Idempotent upsert by login: running it twice with the same arguments
//! converges to the same stable state, with a freshly salted password
//! hash each run.

use std::sync::Arc;

use crate::cli::args::CreateRootArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserStore};
use crate::services::{PasswordProcessor, UserManager, UserService};

/// Execute the create-root command
pub async fn execute(args: CreateRootArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    // The table must exist before the upsert
    db.run_migrations()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    let repo = Arc::new(UserStore::new(db.get_connection()));
    let users = UserManager::new(repo, PasswordProcessor::new(), config.trim_identity);

    let user = users
        .bootstrap_root(args.login, args.phone, args.pass)
        .await?;

    println!("ROOT user ready: login={} phone={}", user.login(), user.phone());
    Ok(())
}
