// src/handlers/auth.rs

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, AppResult, Violation, conflict_on},
    extract::{AppJson, AppPath},
    models::{
        message::MessageResponse,
        user::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, ROLE_USER, RegisterRequest,
            ResetPasswordRequest, TokenResponse, VerifyCodeRequest,
        },
    },
    repositories::{CodeRepo, SessionRepo, UserRepo},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{sign_reset_token, verify_reset_token},
        session::{cleared_session_cookie, session_cookie},
    },
};

/// Tries a verification code allows before it stops matching.
pub const MAX_CODE_ATTEMPTS: i32 = 5;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers a new account with the `user` role.
///
/// Hashes the password using Argon2 before storing it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
    )
)]
pub async fn register(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    let email = normalize_email(&payload.email);
    let hashed_password = hash_password(&payload.password)?;

    let user = UserRepo::create(
        &pool,
        &email,
        &hashed_password,
        payload.name.as_deref(),
        ROLE_USER,
    )
    .await
    .map_err(|e| conflict_on(e, Violation::Unique, "This email is already registered"))?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(Json(MessageResponse::new("User created")))
}

/// Authenticates by email and password and opens a session.
///
/// The session id is set as an HttpOnly cookie and echoed in the body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
    )
)]
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Response> {
    payload.validate()?;

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = UserRepo::find_active_by_email(&pool, &normalize_email(&payload.email))
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(invalid());
    }

    let session_id = Uuid::new_v4();
    let expires_at = Utc::now() + config.session_ttl();
    SessionRepo::create(&pool, session_id, user.id, expires_at).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(session_id, config.session_ttl(), config.cookie_secure);
    let body = LoginResponse {
        message: "Logged in".to_string(),
        session_id,
    };
    Ok((CookieJar::new().add(cookie), Json(body)).into_response())
}

/// Invalidates a session and clears the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout/{session_id}",
    tag = "auth",
    params(("session_id" = String, Path, description = "Session to invalidate")),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "Empty session id", body = MessageResponse),
        (status = 404, description = "No such session", body = MessageResponse),
        (status = 405, description = "Method not allowed", body = MessageResponse),
    )
)]
pub async fn logout(
    State(pool): State<PgPool>,
    AppPath(session_id): AppPath<String>,
) -> AppResult<Response> {
    let session_id = session_id.trim();
    if session_id.is_empty() {
        return Err(empty_session_id());
    }

    // A malformed id cannot name a stored session.
    let not_found = || AppError::NotFound("No session with this id was found".to_string());
    let session_id = Uuid::parse_str(session_id).map_err(|_| not_found())?;

    if !SessionRepo::delete(&pool, session_id).await? {
        return Err(not_found());
    }

    tracing::info!(%session_id, "Session invalidated");
    Ok((
        CookieJar::new().add(cleared_session_cookie()),
        Json(MessageResponse::new("Logged out")),
    )
        .into_response())
}

/// `POST /api/auth/logout` without a session id.
pub async fn logout_without_session() -> AppError {
    empty_session_id()
}

fn empty_session_id() -> AppError {
    AppError::BadRequest("Session id cannot be empty".to_string())
}

/// Method fallback for routes that only accept POST.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Issues a 6-digit verification code for a password reset.
///
/// Replaces any earlier code for the same account, so at most one is live.
/// Always answers 200 so the endpoint cannot be used to probe for accounts.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Code issued if the account exists", body = MessageResponse),
        (status = 400, description = "Bad request", body = MessageResponse),
    )
)]
pub async fn forgot_password(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    AppJson(payload): AppJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    let email = normalize_email(&payload.email);
    if UserRepo::find_active_by_email(&pool, &email).await?.is_some() {
        let code = 100_000 + (OsRng.next_u32() % 900_000) as i32;
        let expires_at = Utc::now() + config.reset_code_ttl();

        let mut tx = pool.begin().await?;
        CodeRepo::delete_for_email(&mut *tx, &email).await?;
        let row = CodeRepo::create(&mut *tx, &email, code, expires_at).await?;
        tx.commit().await?;

        // Delivery happens outside this service.
        tracing::debug!(code_id = row.id, code, "Verification code issued");
    }

    Ok(Json(MessageResponse::new(
        "If the account exists, a verification code has been sent",
    )))
}

/// Exchanges a valid verification code for a short-lived reset token.
///
/// Every call spends one of the live code's `MAX_CODE_ATTEMPTS` tries.
#[utoipa::path(
    post,
    path = "/api/auth/verify-code",
    tag = "auth",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code verified", body = TokenResponse),
        (status = 400, description = "Invalid or expired code", body = MessageResponse),
    )
)]
pub async fn verify_code(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    AppJson(payload): AppJson<VerifyCodeRequest>,
) -> AppResult<Json<TokenResponse>> {
    payload.validate()?;

    let invalid = || AppError::BadRequest("Invalid or expired code".to_string());

    let email = normalize_email(&payload.email);
    let row = CodeRepo::claim_attempt(&pool, &email, MAX_CODE_ATTEMPTS)
        .await?
        .ok_or_else(invalid)?;

    if row.code != payload.code {
        tracing::warn!(code_id = row.id, attempts = row.attempts, "Wrong verification code");
        return Err(invalid());
    }

    let token = sign_reset_token(&row.user_email, &config.jwt_secret, config.reset_code_ttl_secs)?;
    CodeRepo::attach_token(&pool, row.id, &token).await?;

    Ok(Json(TokenResponse {
        message: "Code verified".to_string(),
        token,
    }))
}

/// Sets a new password using a reset token.
///
/// In one transaction: updates the hash, burns the user's codes and ends all
/// of the user's sessions.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = MessageResponse),
    )
)]
pub async fn reset_password(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    let email = verify_reset_token(&payload.token, &config.jwt_secret)?;
    let invalid = || AppError::BadRequest("Invalid or expired token".to_string());

    let hashed_password = hash_password(&payload.password)?;

    let mut tx = pool.begin().await?;

    let row = CodeRepo::find_by_token(&mut *tx, &payload.token)
        .await?
        .ok_or_else(invalid)?;
    if !row.user_email.eq_ignore_ascii_case(&email) {
        return Err(invalid());
    }

    let user = UserRepo::find_active_by_email(&mut *tx, &email)
        .await?
        .ok_or_else(invalid)?;

    UserRepo::update_password(&mut *tx, user.id, &hashed_password).await?;
    CodeRepo::delete_for_email(&mut *tx, &email).await?;
    let ended = SessionRepo::delete_all_for_user(&mut *tx, user.id).await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, ended_sessions = ended, "Password reset");
    Ok(Json(MessageResponse::new("Password updated")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_compared_lowercase() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
