//! Signup, login and logout routes

use axum::{
    extract::{Form, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::error::{ServerError, ServerResult};
use crate::models::{FormScaffold, LoginForm, SignupForm};
use crate::sessions::SESSION_COOKIE;
use crate::AppState;

/// GET /signup - form scaffold (rendering happens client-side)
pub async fn signup_page() -> Json<FormScaffold> {
    Json(FormScaffold::new("signup", &["name", "email", "password"]))
}

/// POST /signup - register a new user
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> ServerResult<Redirect> {
    if form.name.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Err(ServerError::BadRequest("Please fill all fields.".to_string()));
    }

    let hash = hash_password(&form.password)?;
    state.db.create_user(&form.name, &form.email, &hash)?;

    tracing::info!(email = %form.email, "New user registered");
    Ok(Redirect::to("/login"))
}

/// GET /login - form scaffold
pub async fn login_page() -> Json<FormScaffold> {
    Json(FormScaffold::new("login", &["email", "password"]))
}

/// POST /login - verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ServerResult<(CookieJar, Redirect)> {
    let user = state
        .db
        .find_user_by_email(&form.email)?
        .filter(|user| verify_password(&form.password, &user.password))
        .ok_or_else(|| {
            ServerError::Unauthorized("Invalid credentials. Please try again.".to_string())
        })?;

    let token = state.sessions.create(user.id);
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .build();

    tracing::info!(user_id = user.id, "Login successful");
    Ok((jar.add(cookie), Redirect::to("/")))
}

/// GET /logout - end the session and clear the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(token) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<Uuid>().ok())
    {
        state.sessions.remove(&token);
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/login"))
}
