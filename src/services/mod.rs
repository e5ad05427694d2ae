//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod password_processor;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use password_processor::PasswordProcessor;
pub use user_service::{UserManager, UserService};
