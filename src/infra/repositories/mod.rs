//! Repository layer - data access abstraction.

pub(crate) mod entities;
mod user_repository;

pub use user_repository::{UserRepository, UserStore};

// Export mock for tests
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
