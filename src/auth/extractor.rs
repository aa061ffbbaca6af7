use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// The user behind the request's session cookie.
pub struct AuthUser {
    pub user: User,
    pub session_token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let cookies = CookieJar::from_headers(&parts.headers);

        let token = cookies
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        let session = state
            .sessions
            .find_by_token(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            user,
            session_token: token,
        })
    }
}
