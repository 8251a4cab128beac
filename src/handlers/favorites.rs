// src/handlers/favorites.rs

use axum::{Json, extract::State};
use sqlx::PgPool;

use super::movies::movie_not_found;
use crate::{
    error::{AppError, AppResult},
    extract::AppPath,
    models::{favorite::FavoriteMovie, message::MessageResponse},
    repositories::{FavoriteRepo, MovieRepo},
    utils::session::AuthUser,
};

/// The caller's favorites, most recently added first.
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorite movies", body = Vec<FavoriteMovie>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_favorites(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
) -> AppResult<Json<Vec<FavoriteMovie>>> {
    Ok(Json(FavoriteRepo::list_for_user(&pool, auth.user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/favorites/{movie_id}",
    tag = "favorites",
    params(("movie_id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Added to favorites", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 409, description = "Already a favorite", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn add_favorite(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
    AppPath(movie_id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !MovieRepo::exists(&pool, movie_id).await? {
        return Err(movie_not_found());
    }

    if !FavoriteRepo::add(&pool, auth.user_id, movie_id).await? {
        return Err(AppError::Conflict(
            "This movie is already in your favorites".to_string(),
        ));
    }

    Ok(Json(MessageResponse::new("Added to favorites")))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{movie_id}",
    tag = "favorites",
    params(("movie_id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Removed from favorites", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not a favorite", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn remove_favorite(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
    AppPath(movie_id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !FavoriteRepo::remove(&pool, auth.user_id, movie_id).await? {
        return Err(AppError::NotFound(
            "This movie is not in your favorites".to_string(),
        ));
    }
    Ok(Json(MessageResponse::new("Removed from favorites")))
}
