//! JWT authentication middleware and capability checks.
//!
//! Authorization is expressed as explicit checks next to the handlers
//! (`require_root`, self-or-root) rather than declarative rules.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ROOT};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub login: String,
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Check if the caller holds the privileged role.
    pub fn is_root(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ROOT)
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        login: claims.login,
        roles: claims.roles,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require the privileged role, returns Forbidden error otherwise.
pub fn require_root(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_root() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the caller to be the addressed user or privileged.
pub fn require_self_or_root(user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
    if user.id == id {
        Ok(())
    } else {
        require_root(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROLE_USER;

    fn caller(roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id: Uuid::now_v7(),
            login: "caller".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn root_passes_both_checks() {
        let user = caller(&[ROLE_ROOT, ROLE_USER]);
        assert!(require_root(&user).is_ok());
        assert!(require_self_or_root(&user, Uuid::now_v7()).is_ok());
    }

    #[test]
    fn plain_user_may_only_address_self() {
        let user = caller(&[ROLE_USER]);
        assert!(matches!(
            require_root(&user).unwrap_err(),
            AppError::Forbidden
        ));
        assert!(require_self_or_root(&user, user.id).is_ok());
        assert!(require_self_or_root(&user, Uuid::now_v7()).is_err());
    }
}
