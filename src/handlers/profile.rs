use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    extract::AppJson,
    models::{
        message::MessageResponse,
        user::{UpdateProfileRequest, User},
    },
    repositories::{SessionRepo, UserRepo},
    utils::{
        session::{AuthUser, cleared_session_cookie},
        validate::parse_date,
    },
};

/// Get the current user's profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_profile(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_active_by_id(&pool, auth.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update name, phone and date of birth of the current user.
///
/// The name is capped at 16 characters and the date must be `YYYY-MM-DD`;
/// nothing is written unless every field passes.
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_profile(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;
    let date_of_birth = parse_date(payload.date_of_birth.trim())?;

    let updated = UserRepo::update_profile(
        &pool,
        auth.user_id,
        payload.name.trim(),
        payload.phone.trim(),
        date_of_birth,
    )
    .await?;

    if !updated {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Profile updated")))
}

/// Soft-delete the current account and end all of its sessions.
#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_profile(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
) -> AppResult<Response> {
    let mut tx = pool.begin().await?;

    if !UserRepo::soft_delete(&mut *tx, auth.user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    SessionRepo::delete_all_for_user(&mut *tx, auth.user_id).await?;

    tx.commit().await?;

    tracing::info!(user_id = auth.user_id, "Account soft-deleted");
    Ok((
        CookieJar::new().add(cleared_session_cookie()),
        Json(MessageResponse::new("Account deleted")),
    )
        .into_response())
}
