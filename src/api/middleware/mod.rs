//! HTTP middleware.

mod auth;

pub use auth::{auth_middleware, require_root, require_self_or_root, CurrentUser};
