//! Authentication route handlers.
//!
//! JSON signup and sign-in. Both respond with the user's public profile.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, set_sentry_user};
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;
use crate::validation::SignupRequest;

/// Sign-in request body.
#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register a new account.
///
/// POST /auth/signup
#[instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.users()).signup(&request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in with email and password.
///
/// POST /auth/signin
#[instrument(skip(state, request))]
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.users())
        .signin(&request.email, &request.password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(Json(user))
}
