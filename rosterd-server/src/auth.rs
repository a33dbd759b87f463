//! Password hashing and session extractors
//!
//! Passwords are stored as salted Argon2 PHC strings. Sessions are opaque
//! uuid tokens carried in the `rosterd_session` cookie and resolved
//! against the in-process store.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::error::ServerError;
use crate::sessions::SESSION_COOKIE;
use crate::AppState;

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServerError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn resolve_session(parts: &Parts, state: &AppState) -> Option<i64> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token: Uuid = jar.get(SESSION_COOKIE)?.value().parse().ok()?;
    state.sessions.user_id(&token)
}

/// Logged-in user for page routes
///
/// Missing or unknown sessions reject with a redirect to `/login`.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .map(|user_id| SessionUser { user_id })
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}

/// Logged-in user for JSON endpoints
///
/// Same lookup as [`SessionUser`], but rejects with a 401 JSON body
/// instead of a redirect.
#[derive(Debug, Clone, Copy)]
pub struct ApiUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .map(|user_id| ApiUser { user_id })
            .ok_or_else(|| ServerError::Unauthorized("User not logged in".to_string()))
    }
}
