//! Password processor - hashes submitted plaintext before persistence.
//!
//! Every create/update path runs a record through here before it reaches
//! durable storage, so the stored credential is always a hash and the
//! transient plaintext holder is always cleared. An earlier design that
//! sniffed the stored hash's prefix to decide whether to re-hash was
//! discarded as fragile; the plaintext holder has no such ambiguity.

use crate::domain::{Password, User};
use crate::errors::AppResult;

/// Hashing step applied to a user record immediately before persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordProcessor;

impl PasswordProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Hash a pending plaintext into the record, then clear the holder.
    ///
    /// A plaintext that is absent or blank after trimming leaves the
    /// stored hash untouched; the holder is cleared regardless, which
    /// makes double invocation a no-op. Hashing failures propagate and
    /// never result in plaintext or an empty hash being stored.
    pub fn process(&self, user: &mut User) -> AppResult<()> {
        let submitted = user
            .plain_password()
            .map(str::trim)
            .filter(|plain| !plain.is_empty())
            .map(str::to_owned);

        if let Some(plain) = submitted {
            let hash = Password::new(&plain)?;
            user.set_password_hash(hash.into_string());
        }

        user.set_plain_password(None);
        Ok(())
    }
}
