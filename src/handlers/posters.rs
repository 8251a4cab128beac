// src/handlers/posters.rs

use axum::{Json, extract::State};
use sqlx::PgPool;
use validator::Validate;

use super::movies::movie_not_found;
use crate::{
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    models::{
        message::MessageResponse,
        poster::{Poster, PosterRequest},
    },
    repositories::{MovieRepo, PosterRepo},
    utils::session::{AuthUser, RequireAdmin},
};

fn no_posters() -> AppError {
    AppError::NotFound("This movie has no posters".to_string())
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}/posters",
    tag = "posters",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie's posters", body = Poster),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Movie has no posters", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_posters(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(movie_id): AppPath<i64>,
) -> AppResult<Json<Poster>> {
    let poster = PosterRepo::find_by_movie(&pool, movie_id)
        .await?
        .ok_or_else(no_posters)?;
    Ok(Json(poster))
}

/// Sets the movie's posters, replacing any existing set. Admin only.
#[utoipa::path(
    put,
    path = "/api/movies/{id}/posters",
    tag = "posters",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = PosterRequest,
    responses(
        (status = 200, description = "Stored posters", body = Poster),
        (status = 400, description = "Invalid URL", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn put_posters(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(movie_id): AppPath<i64>,
    AppJson(payload): AppJson<PosterRequest>,
) -> AppResult<Json<Poster>> {
    payload.validate()?;

    if !MovieRepo::exists(&pool, movie_id).await? {
        return Err(movie_not_found());
    }

    let poster = PosterRepo::upsert(&pool, movie_id, &payload).await?;
    Ok(Json(poster))
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}/posters",
    tag = "posters",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Posters removed", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Movie has no posters", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_posters(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(movie_id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !PosterRepo::delete_for_movie(&pool, movie_id).await? {
        return Err(no_posters());
    }
    Ok(Json(MessageResponse::new("Posters deleted")))
}
