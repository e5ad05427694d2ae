//! Shared test support: an in-memory stand-in for the storage boundary.
//!
//! Enforces the same uniqueness contract as the real store, surfacing
//! collisions as `AppError::UniqueViolation`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use user_directory::domain::User;
use user_directory::errors::{AppError, AppResult};
use user_directory::infra::UserRepository;

/// In-memory user store with login/phone uniqueness enforcement.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn collides(records: &[User], user: &User) -> bool {
        records.iter().any(|existing| {
            existing.id() != user.id()
                && (existing.login() == user.login() || existing.phone() == user.phone())
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|u| u.login() == login).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut records = self.records.lock().unwrap();
        if Self::collides(&records, user) {
            return Err(AppError::UniqueViolation);
        }
        records.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut records = self.records.lock().unwrap();
        if Self::collides(&records, user) {
            return Err(AppError::UniqueViolation);
        }
        let slot = records
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or(AppError::NotFound)?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|u| u.id() != id);
        if records.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Repository wrapped for service construction.
pub fn repository() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::new())
}
