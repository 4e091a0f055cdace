use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{bearer_auth_middleware, TokenService, ValidatedJson};
use core_config::Environment;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::interceptor::hash_password_body;
use crate::models::{CreateUser, Credentials, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// State shared by the user-directory handlers.
pub struct UsersState<R: UserRepository> {
    pub service: UserService<R>,
    pub tokens: TokenService,
    pub environment: Environment,
}

impl<R: UserRepository> Clone for UsersState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tokens: self.tokens.clone(),
            environment: self.environment.clone(),
        }
    }
}

/// Build the user-directory router.
///
/// Login and registration are anonymous; the remaining CRUD surface sits
/// behind the bearer-token guard. Both write routes pass through the
/// credential interceptor, so a plaintext password can never reach the
/// handlers or the store.
pub fn router<R: UserRepository + 'static>(state: UsersState<R>) -> Router {
    let guard = middleware::from_fn_with_state(state.tokens.clone(), bearer_auth_middleware);
    let hashing = middleware::from_fn(hash_password_body);

    Router::new()
        .route("/login", post(login::<R>))
        .route(
            "/users",
            post(create_user::<R>.layer(hashing.clone()))
                .get(list_users::<R>.layer(guard.clone())),
        )
        .route(
            "/users/{id}",
            get(get_user::<R>.layer(guard.clone()))
                .put(update_user::<R>.layer(hashing).layer(guard.clone()))
                .delete(delete_user::<R>.layer(guard)),
        )
        .with_state(state)
}

/// Authenticate a credential pair.
///
/// POST /login
///
/// This is the catch-all boundary for the login flow: the specific lookup
/// and verification failures keep their legacy responses, and any
/// unexpected fault (store failure, signing misconfiguration) is logged and
/// reported generically. Detail reaches the response only in development
/// mode.
async fn login<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Response {
    match state.service.authenticate(&state.tokens, credentials).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err @ (UserError::EmailNotFound | UserError::PasswordMismatch)) => err.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "login failed unexpectedly");
            let message = if state.environment.is_development() {
                err.to_string()
            } else {
                "unexpected fault".to_string()
            };
            UserError::LoginFailed(message).into_response()
        }
    }
}

/// Register a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(state): State<UsersState<R>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

/// Get a user by ID
///
/// GET /users/:id
async fn get_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<Uuid>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.get_user(id).await?;
    Ok(Json(user))
}

/// Update a user
///
/// PUT /users/:id
async fn update_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
///
/// DELETE /users/:id
async fn delete_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    Path(id): Path<Uuid>,
) -> UserResult<impl IntoResponse> {
    state.service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
