//! Role registry - the closed set of recognized role identifiers.
//!
//! Roles are part of the compiled configuration, not data: the set is
//! fixed at exactly two members and new roles are never introduced at
//! runtime.

use crate::config::{ROLE_ROOT, ROLE_USER, VALID_ROLES};

/// Application roles, backed by their wire identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Base role held by every account
    User,
    /// Privileged role with administrative capabilities
    Root,
}

impl Role {
    /// The wire identifier for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Root => ROLE_ROOT,
        }
    }

    /// All recognized role identifiers, in declaration order.
    pub fn values() -> &'static [&'static str] {
        VALID_ROLES
    }

    /// Look up a role by its identifier. Unrecognized tokens yield `None`,
    /// never an error.
    pub fn parse(token: &str) -> Option<Role> {
        match token {
            ROLE_USER => Some(Role::User),
            ROLE_ROOT => Some(Role::Root),
            _ => None,
        }
    }

    /// Normalize a list of role tokens.
    ///
    /// - trims each token and drops empty ones
    /// - drops unrecognized tokens
    /// - de-dupes preserving first-seen order
    /// - guarantees the base role is present
    ///
    /// Pure and total: never fails, and degrades to `[ROLE_USER]` for
    /// arbitrary garbage input.
    pub fn normalize<I, S>(tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if Role::parse(token).is_none() {
                continue;
            }
            if normalized.iter().any(|seen| seen == token) {
                continue;
            }
            normalized.push(token.to_string());
        }

        if !normalized.iter().any(|role| role == ROLE_USER) {
            normalized.push(ROLE_USER.to_string());
        }

        normalized
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_lists_the_closed_set_in_order() {
        assert_eq!(Role::values(), &[ROLE_USER, ROLE_ROOT]);
    }

    #[test]
    fn parse_recognizes_known_roles() {
        assert_eq!(Role::parse("ROLE_USER"), Some(Role::User));
        assert_eq!(Role::parse("ROLE_ROOT"), Some(Role::Root));
    }

    #[test]
    fn parse_returns_none_for_unknown_tokens() {
        assert_eq!(Role::parse("ROLE_ADMIN"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("role_user"), None);
    }

    #[test]
    fn normalize_always_contains_base_role_without_duplicates() {
        let out = Role::normalize(["ROLE_ROOT", "ROLE_USER", "ROLE_ROOT"]);
        assert_eq!(out, vec!["ROLE_ROOT", "ROLE_USER"]);

        let out = Role::normalize(["ROLE_ROOT"]);
        assert_eq!(out, vec!["ROLE_ROOT", "ROLE_USER"]);
    }

    #[test]
    fn normalize_drops_unknown_tokens_silently() {
        let out = Role::normalize(["ROLE_SUPERVISOR", "ROLE_ROOT", "banana"]);
        assert_eq!(out, vec!["ROLE_ROOT", "ROLE_USER"]);
        assert!(!out.iter().any(|r| r == "ROLE_SUPERVISOR"));
    }

    #[test]
    fn normalize_empty_input_yields_base_role() {
        let out = Role::normalize(Vec::<String>::new());
        assert_eq!(out, vec!["ROLE_USER"]);
    }

    #[test]
    fn normalize_trims_and_drops_blank_tokens() {
        let out = Role::normalize(["  ROLE_ROOT  ", "", "   "]);
        assert_eq!(out, vec!["ROLE_ROOT", "ROLE_USER"]);
    }
}
