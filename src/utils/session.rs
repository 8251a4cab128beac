// src/utils/session.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppError, models::session::AuthContext, repositories::SessionRepo};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// The session cookie issued at login.
pub fn session_cookie(
    session_id: Uuid,
    max_age: chrono::Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .secure(secure)
        .build()
}

/// A cookie that makes the browser drop the session cookie.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Finds the session id on a request.
///
/// The `session_id` cookie wins; `Authorization: Bearer <session id>` is
/// accepted for non-browser clients. Values that are not UUIDs are ignored.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value().trim()).ok());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| Uuid::parse_str(token.trim()).ok())
    })
}

/// Axum Middleware: Session authentication.
///
/// Resolves the session id on the request to an [`AuthContext`] and injects
/// it into the request extensions. Missing, unknown or expired sessions get
/// 401 Unauthorized.
pub async fn session_middleware(
    State(pool): State<PgPool>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = session_id_from_headers(req.headers()).ok_or_else(AppError::unauthorized)?;

    let context = SessionRepo::resolve(&pool, session_id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Any authenticated user.
///
/// Reads the [`AuthContext`] left by [`session_middleware`]; a request that
/// carries none (or a zero user id) is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(context) if context.user_id != 0 => Ok(AuthUser(context.clone())),
            _ => Err(AppError::unauthorized()),
        }
    }
}

/// Requires the `admin` role. Anything else is 401 Unauthorized.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(context) = AuthUser::from_request_parts(parts, state).await?;
        if !context.is_admin() {
            return Err(AppError::unauthorized());
        }
        Ok(RequireAdmin(context))
    }
}
