//! User domain entity.
//!
//! Pure data plus role normalization. Uniqueness of `login` and `phone`
//! is enforced at the storage boundary, not here; password hashing is the
//! password processor's job.

use uuid::Uuid;

use crate::config::ROLE_USER;
use crate::domain::Role;

/// The persisted identity entity.
///
/// `plain_password` is a transient holder carrying a submitted password
/// between request intake and hashing; it is never persisted and never
/// serialized. Mutators return `&mut Self` to support chaining.
#[derive(Clone)]
pub struct User {
    id: Uuid,
    login: String,
    phone: String,
    password_hash: String,
    plain_password: Option<String>,
    roles: Vec<String>,
}

// Credentials stay out of debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("phone", &self.phone)
            .field("password_hash", &"[REDACTED]")
            .field("plain_password", &self.plain_password.as_ref().map(|_| "[REDACTED]"))
            .field("roles", &self.roles)
            .finish()
    }
}

impl User {
    /// Create a new record with a freshly generated time-ordered id and
    /// the base role.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            login: String::new(),
            phone: String::new(),
            password_hash: String::new(),
            plain_password: None,
            roles: vec![ROLE_USER.to_string()],
        }
    }

    /// Rebuild a record from stored fields. Roles are re-normalized so the
    /// base-role invariant holds even for rows edited out-of-band.
    pub fn from_stored(
        id: Uuid,
        login: String,
        phone: String,
        password_hash: String,
        roles: Vec<String>,
    ) -> Self {
        Self {
            id,
            login,
            phone,
            password_hash,
            plain_password: None,
            roles: Role::normalize(roles),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Set the login verbatim. Trimming is the caller's policy.
    pub fn set_login(&mut self, login: impl Into<String>) -> &mut Self {
        self.login = login.into();
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Set the phone verbatim. Trimming is the caller's policy.
    pub fn set_phone(&mut self, phone: impl Into<String>) -> &mut Self {
        self.phone = phone.into();
        self
    }

    /// The stored hash. Never exposed through any API response.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Raw accessor: no hashing happens here.
    pub fn set_password_hash(&mut self, hash: impl Into<String>) -> &mut Self {
        self.password_hash = hash.into();
        self
    }

    pub fn plain_password(&self) -> Option<&str> {
        self.plain_password.as_deref()
    }

    pub fn set_plain_password(&mut self, plain: Option<String>) -> &mut Self {
        self.plain_password = plain;
        self
    }

    /// Stored roles; always contains the base role by construction.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Store the normalized form of the given tokens. Unknown tokens are
    /// dropped, duplicates collapse, and the base role is guaranteed.
    pub fn set_roles<I, S>(&mut self, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles = Role::normalize(roles);
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Identity used for authentication purposes.
    pub fn identifier(&self) -> &str {
        &self.login
    }

    /// Clear the transient plaintext. The stored hash is untouched.
    pub fn erase_credentials(&mut self) {
        self.plain_password = None;
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROLE_ROOT;

    #[test]
    fn new_user_has_id_and_base_role() {
        let user = User::new();
        assert_eq!(user.id().get_version_num(), 7);
        assert_eq!(user.roles(), &[ROLE_USER.to_string()]);
        assert!(user.login().is_empty());
        assert!(user.phone().is_empty());
        assert!(user.plain_password().is_none());
    }

    #[test]
    fn ids_are_distinct_and_time_ordered() {
        let first = User::new();
        // v7 ids embed a millisecond timestamp; step past it so ordering
        // is observable.
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = User::new();

        assert_ne!(first.id(), second.id());
        assert!(first.id() < second.id());
    }

    #[test]
    fn setters_chain_and_store_verbatim() {
        let mut user = User::new();
        user.set_login("  alice  ")
            .set_phone(" +1000 ")
            .set_password_hash("H1")
            .set_plain_password(Some("secret".into()));

        // Entity-level setters do not trim; that policy lives upstream.
        assert_eq!(user.login(), "  alice  ");
        assert_eq!(user.phone(), " +1000 ");
        assert_eq!(user.password_hash(), "H1");
        assert_eq!(user.plain_password(), Some("secret"));
    }

    #[test]
    fn set_roles_normalizes_input() {
        let mut user = User::new();
        user.set_roles([ROLE_ROOT, ROLE_USER, ROLE_ROOT, "INVALID_ROLE"]);

        assert_eq!(user.roles().len(), 2);
        assert!(user.has_role(ROLE_USER));
        assert!(user.has_role(ROLE_ROOT));
    }

    #[test]
    fn set_roles_empty_keeps_base_role() {
        let mut user = User::new();
        user.set_roles(Vec::<String>::new());
        assert_eq!(user.roles(), &[ROLE_USER.to_string()]);
    }

    #[test]
    fn erase_credentials_clears_plaintext_only() {
        let mut user = User::new();
        user.set_password_hash("H1")
            .set_plain_password(Some("secret".into()));

        user.erase_credentials();

        assert_eq!(user.password_hash(), "H1");
        assert!(user.plain_password().is_none());
    }

    #[test]
    fn identifier_is_the_login() {
        let mut user = User::new();
        user.set_login("alice");
        assert_eq!(user.identifier(), "alice");
    }

    #[test]
    fn from_stored_renormalizes_roles() {
        let user = User::from_stored(
            Uuid::now_v7(),
            "bob".into(),
            "+2000".into(),
            "H2".into(),
            vec!["ROLE_ROOT".into(), "ROLE_GHOST".into()],
        );

        assert!(user.has_role(ROLE_USER));
        assert!(user.has_role(ROLE_ROOT));
        assert!(!user.has_role("ROLE_GHOST"));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let mut user = User::new();
        user.set_password_hash("H1")
            .set_plain_password(Some("secret".into()));

        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("H1"));
        assert!(!rendered.contains("secret"));
    }
}
