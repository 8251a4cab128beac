// src/handlers/episodes.rs

use axum::{Json, extract::State};
use sqlx::PgPool;
use validator::Validate;

use super::seasons::season_not_found;
use crate::{
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    models::{
        episode::{Episode, EpisodeRequest},
        message::MessageResponse,
    },
    repositories::{EpisodeRepo, SeasonRepo, episode_repo::EpisodeFields},
    utils::{
        html::clean_optional_html,
        session::{AuthUser, RequireAdmin},
        validate::parse_optional_date,
    },
};

fn episode_not_found() -> AppError {
    AppError::NotFound("Episode not found".to_string())
}

/// Validates the payload and derives the stored fields from it.
fn episode_fields(payload: &EpisodeRequest) -> AppResult<EpisodeFields<'_>> {
    payload.validate()?;
    Ok(EpisodeFields {
        input: payload,
        release_date: parse_optional_date(payload.release_date.as_deref().map(str::trim))?,
        description: clean_optional_html(payload.description.as_deref()),
    })
}

#[utoipa::path(
    get,
    path = "/api/seasons/{id}/episodes",
    tag = "episodes",
    params(("id" = i64, Path, description = "Season id")),
    responses(
        (status = 200, description = "Episodes ordered by number", body = Vec<Episode>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Season not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_episodes(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(season_id): AppPath<i64>,
) -> AppResult<Json<Vec<Episode>>> {
    if !SeasonRepo::exists(&pool, season_id).await? {
        return Err(season_not_found());
    }
    Ok(Json(EpisodeRepo::list_for_season(&pool, season_id).await?))
}

/// Adds an episode to a season. Admin only.
#[utoipa::path(
    post,
    path = "/api/seasons/{id}/episodes",
    tag = "episodes",
    params(("id" = i64, Path, description = "Season id")),
    request_body = EpisodeRequest,
    responses(
        (status = 200, description = "Created episode", body = Episode),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Season not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_episode(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(season_id): AppPath<i64>,
    AppJson(payload): AppJson<EpisodeRequest>,
) -> AppResult<Json<Episode>> {
    let fields = episode_fields(&payload)?;

    if !SeasonRepo::exists(&pool, season_id).await? {
        return Err(season_not_found());
    }

    let episode = EpisodeRepo::create(&pool, admin.user_id, season_id, &fields).await?;

    tracing::info!(episode_id = episode.id, season_id, "Episode created");
    Ok(Json(episode))
}

#[utoipa::path(
    get,
    path = "/api/episodes/{id}",
    tag = "episodes",
    params(("id" = i64, Path, description = "Episode id")),
    responses(
        (status = 200, description = "The episode", body = Episode),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Episode not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_episode(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Episode>> {
    let episode = EpisodeRepo::find_by_id(&pool, id)
        .await?
        .ok_or_else(episode_not_found)?;
    Ok(Json(episode))
}

#[utoipa::path(
    put,
    path = "/api/episodes/{id}",
    tag = "episodes",
    params(("id" = i64, Path, description = "Episode id")),
    request_body = EpisodeRequest,
    responses(
        (status = 200, description = "Updated episode", body = Episode),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Episode not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_episode(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<EpisodeRequest>,
) -> AppResult<Json<Episode>> {
    let fields = episode_fields(&payload)?;

    let episode = EpisodeRepo::update(&pool, id, &fields)
        .await?
        .ok_or_else(episode_not_found)?;

    Ok(Json(episode))
}

#[utoipa::path(
    delete,
    path = "/api/episodes/{id}",
    tag = "episodes",
    params(("id" = i64, Path, description = "Episode id")),
    responses(
        (status = 200, description = "Episode deleted", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Episode not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_episode(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !EpisodeRepo::delete(&pool, id).await? {
        return Err(episode_not_found());
    }
    Ok(Json(MessageResponse::new("Episode deleted")))
}
