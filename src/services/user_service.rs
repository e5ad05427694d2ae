//! User service - user CRUD and the root bootstrap use case.
//!
//! Orchestrates the domain entity, the password processor, and the
//! repository. Every path that can carry a submitted password runs the
//! processor before the record reaches storage.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ROLE_ROOT;
use crate::domain::User;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::services::PasswordProcessor;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create a new user with the base role
    async fn create_user(&self, login: String, phone: String, pass: String) -> AppResult<User>;

    /// Update phone and/or password of an existing user
    async fn update_user(
        &self,
        id: Uuid,
        phone: Option<String>,
        pass: Option<String>,
    ) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Create or update the privileged account (idempotent upsert by login)
    async fn bootstrap_root(&self, login: String, phone: String, pass: String) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    processor: PasswordProcessor,
    trim_identity: bool,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, processor: PasswordProcessor, trim_identity: bool) -> Self {
        Self {
            repo,
            processor,
            trim_identity,
        }
    }

    /// Apply the configured identity-trim policy to login/phone input.
    fn identity(&self, value: String) -> String {
        if self.trim_identity {
            value.trim().to_string()
        } else {
            value
        }
    }

    fn require_non_blank_password(pass: &str) -> AppResult<()> {
        if pass.trim().is_empty() {
            return Err(AppError::validation("Password is required."));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, login: String, phone: String, pass: String) -> AppResult<User> {
        Self::require_non_blank_password(&pass)?;

        let login = self.identity(login);
        let phone = self.identity(phone);

        let mut user = User::new();
        user.set_login(login)
            .set_phone(phone)
            .set_plain_password(Some(pass));

        self.processor.process(&mut user)?;
        self.repo.insert(&user).await
    }

    async fn update_user(
        &self,
        id: Uuid,
        phone: Option<String>,
        pass: Option<String>,
    ) -> AppResult<User> {
        if let Some(ref pass) = pass {
            Self::require_non_blank_password(pass)?;
        }

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if let Some(phone) = phone {
            let phone = self.identity(phone);
            user.set_phone(phone);
        }
        user.set_plain_password(pass);

        self.processor.process(&mut user)?;
        self.repo.update(&user).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }

    async fn bootstrap_root(&self, login: String, phone: String, pass: String) -> AppResult<User> {
        Self::require_non_blank_password(&pass)?;

        let login = self.identity(login);
        let phone = self.identity(phone);

        let existing = self.repo.find_by_login(&login).await?;
        let is_new = existing.is_none();

        let mut user = match existing {
            Some(user) => user,
            None => {
                let mut user = User::new();
                user.set_login(login);
                user
            }
        };

        user.set_phone(phone)
            .set_roles([ROLE_ROOT])
            .set_plain_password(Some(pass));

        // The password is re-hashed on every run; a fresh salt means the
        // stored hash differs run-to-run while the state stays converged.
        self.processor.process(&mut user)?;

        if is_new {
            self.repo.insert(&user).await
        } else {
            self.repo.update(&user).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROLE_USER;
    use crate::domain::Password;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), PasswordProcessor::new(), true)
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(repo).get_user(Uuid::now_v7()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn create_user_hashes_before_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().returning(|user| {
            // The record must arrive at the storage boundary hashed and
            // with the plaintext holder cleared.
            assert!(user.plain_password().is_none());
            assert!(!user.password_hash().is_empty());
            assert_ne!(user.password_hash(), "Secret123");
            Ok(user.clone())
        });

        let user = manager(repo)
            .create_user("alice".into(), "+1000".into(), "Secret123".into())
            .await
            .unwrap();

        assert_eq!(user.login(), "alice");
        assert_eq!(user.roles(), &[ROLE_USER.to_string()]);
    }

    #[tokio::test]
    async fn create_user_trims_identity_when_configured() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().returning(|user| Ok(user.clone()));

        let user = manager(repo)
            .create_user("  alice  ".into(), " +1000 ".into(), "Secret123".into())
            .await
            .unwrap();

        assert_eq!(user.login(), "alice");
        assert_eq!(user.phone(), "+1000");
    }

    #[tokio::test]
    async fn create_user_keeps_identity_verbatim_when_trim_disabled() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().returning(|user| Ok(user.clone()));

        let service = UserManager::new(Arc::new(repo), PasswordProcessor::new(), false);
        let user = service
            .create_user("  alice  ".into(), "+1000".into(), "Secret123".into())
            .await
            .unwrap();

        assert_eq!(user.login(), "  alice  ");
    }

    #[tokio::test]
    async fn create_user_rejects_blank_password() {
        let repo = MockUserRepository::new();

        let result = manager(repo)
            .create_user("alice".into(), "+1000".into(), "   ".into())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_user_without_password_keeps_hash() {
        let id = Uuid::now_v7();
        let stored = User::from_stored(id, "alice".into(), "+1000".into(), "H1".into(), vec![]);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update().returning(|user| {
            assert_eq!(user.password_hash(), "H1");
            Ok(user.clone())
        });

        let user = manager(repo)
            .update_user(id, Some("+2000".into()), None)
            .await
            .unwrap();

        assert_eq!(user.phone(), "+2000");
    }

    #[tokio::test]
    async fn bootstrap_root_creates_when_absent() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .withf(|login| login == "root")
            .returning(|_| Ok(None));
        repo.expect_insert().returning(|user| {
            assert!(user.has_role(ROLE_ROOT));
            assert!(user.has_role(ROLE_USER));
            assert!(user.plain_password().is_none());
            assert!(Password::from_hash(user.password_hash().to_string()).verify("rootpass"));
            Ok(user.clone())
        });

        let user = manager(repo)
            .bootstrap_root("root".into(), "+10000000000".into(), "rootpass".into())
            .await
            .unwrap();

        assert_eq!(user.login(), "root");
    }

    #[tokio::test]
    async fn bootstrap_root_updates_existing_record() {
        let id = Uuid::now_v7();
        let stored = User::from_stored(
            id,
            "root".into(),
            "+1999".into(),
            "OLD_HASH".into(),
            vec![ROLE_USER.to_string()],
        );

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_insert().never();
        repo.expect_update().returning(|user| {
            // Same id, forced roles, freshly hashed password
            assert!(user.has_role(ROLE_ROOT));
            assert_ne!(user.password_hash(), "OLD_HASH");
            Ok(user.clone())
        });

        let user = manager(repo)
            .bootstrap_root("root".into(), "+10000000000".into(), "rootpass".into())
            .await
            .unwrap();

        assert_eq!(user.id(), id);
        assert_eq!(user.phone(), "+10000000000");
    }
}
