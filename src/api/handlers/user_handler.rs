//! User CRUD handlers.
//!
//! Field visibility is shaped explicitly per operation: responses carry
//! `id`, `login`, `phone` and `roles`; the submitted `pass` is accepted
//! on create/update and never echoed back. Roles are server-assigned.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_root, require_self_or_root, CurrentUser};
use crate::api::AppState;
use crate::domain::User;
use crate::errors::AppResult;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Unique account login
    #[validate(length(min = 1, message = "Login is required."))]
    #[schema(example = "alice")]
    pub login: String,
    /// Unique phone number
    #[validate(length(min = 1, message = "Phone is required."))]
    #[schema(example = "+1000")]
    pub phone: String,
    /// Plaintext password, hashed before storage
    #[validate(length(min = 1, message = "Password is required."))]
    #[schema(example = "Secret123")]
    pub pass: String,
}

/// User update request. The login is immutable post-create and roles are
/// never client-assigned.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New phone number
    #[validate(length(min = 1, message = "Phone is required."))]
    #[schema(example = "+2000")]
    pub phone: Option<String>,
    /// New plaintext password, hashed before storage
    #[validate(length(min = 1, message = "Password is required."))]
    #[schema(example = "Secret456")]
    pub pass: String,
}

/// User response (safe to return to client; never carries credentials)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "01890a5d-ac96-774b-bcce-b302099a8057")]
    pub id: Uuid,
    /// Account login
    #[schema(example = "alice")]
    pub login: String,
    /// Phone number
    #[schema(example = "+1000")]
    pub phone: String,
    /// Normalized role identifiers
    #[schema(example = json!(["ROLE_USER"]))]
    pub roles: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            login: user.login().to_string(),
            phone: user.phone().to_string(),
            roles: user.roles().to_vec(),
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// List all users (root only)
#[utoipa::path(
    get,
    path = "/v1/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - root only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_root(&current_user)?;
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a new user (root only)
#[utoipa::path(
    post,
    path = "/v1/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - root only"),
        (status = 409, description = "Login or phone already taken")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_root(&current_user)?;

    let user = state
        .user_service
        .create_user(payload.login, payload.phone, payload.pass)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get user by ID (self or root)
#[utoipa::path(
    get,
    path = "/v1/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - self or root only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_self_or_root(&current_user, id)?;

    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update user phone/password (self or root)
#[utoipa::path(
    put,
    path = "/v1/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - self or root only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Phone already taken")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_self_or_root(&current_user, id)?;

    let user = state
        .user_service
        .update_user(id, payload.phone, Some(payload.pass))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete user (root only)
#[utoipa::path(
    delete,
    path = "/v1/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - root only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_root(&current_user)?;

    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
