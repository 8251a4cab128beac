// src/handlers/seasons.rs

use axum::{Json, extract::State};
use sqlx::PgPool;
use validator::Validate;

use super::movies::movie_not_found;
use crate::{
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    models::{
        message::MessageResponse,
        season::{Season, SeasonRequest},
    },
    repositories::{MovieRepo, SeasonRepo},
    utils::{
        html::clean_html,
        session::{AuthUser, RequireAdmin},
        validate::parse_date,
    },
};

pub(crate) fn season_not_found() -> AppError {
    AppError::NotFound("Season not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}/seasons",
    tag = "seasons",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Seasons ordered by number", body = Vec<Season>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_seasons(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(movie_id): AppPath<i64>,
) -> AppResult<Json<Vec<Season>>> {
    if !MovieRepo::exists(&pool, movie_id).await? {
        return Err(movie_not_found());
    }
    Ok(Json(SeasonRepo::list_for_movie(&pool, movie_id).await?))
}

/// Adds a season to a movie. Admin only.
#[utoipa::path(
    post,
    path = "/api/movies/{id}/seasons",
    tag = "seasons",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Created season", body = Season),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_season(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(movie_id): AppPath<i64>,
    AppJson(payload): AppJson<SeasonRequest>,
) -> AppResult<Json<Season>> {
    payload.validate()?;
    let release_date = parse_date(payload.release_date.trim())?;
    let description = clean_html(&payload.description);

    if !MovieRepo::exists(&pool, movie_id).await? {
        return Err(movie_not_found());
    }

    let season = SeasonRepo::create(
        &pool,
        admin.user_id,
        movie_id,
        &payload,
        &description,
        release_date,
    )
    .await?;

    tracing::info!(season_id = season.id, movie_id, "Season created");
    Ok(Json(season))
}

#[utoipa::path(
    get,
    path = "/api/seasons/{id}",
    tag = "seasons",
    params(("id" = i64, Path, description = "Season id")),
    responses(
        (status = 200, description = "The season", body = Season),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Season not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_season(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Season>> {
    let season = SeasonRepo::find_by_id(&pool, id)
        .await?
        .ok_or_else(season_not_found)?;
    Ok(Json(season))
}

#[utoipa::path(
    put,
    path = "/api/seasons/{id}",
    tag = "seasons",
    params(("id" = i64, Path, description = "Season id")),
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Updated season", body = Season),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Season not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_season(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<SeasonRequest>,
) -> AppResult<Json<Season>> {
    payload.validate()?;
    let release_date = parse_date(payload.release_date.trim())?;
    let description = clean_html(&payload.description);

    let season = SeasonRepo::update(&pool, id, &payload, &description, release_date)
        .await?
        .ok_or_else(season_not_found)?;

    Ok(Json(season))
}

/// Deletes a season together with its episodes.
#[utoipa::path(
    delete,
    path = "/api/seasons/{id}",
    tag = "seasons",
    params(("id" = i64, Path, description = "Season id")),
    responses(
        (status = 200, description = "Season deleted", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Season not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_season(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !SeasonRepo::delete(&pool, id).await? {
        return Err(season_not_found());
    }

    tracing::info!(season_id = id, "Season deleted");
    Ok(Json(MessageResponse::new("Season deleted")))
}
