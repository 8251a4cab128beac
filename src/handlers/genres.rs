// src/handlers/genres.rs

use axum::{Json, extract::State};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, Violation, conflict_on},
    extract::{AppJson, AppPath},
    models::{
        genre::{Genre, GenreRequest},
        message::MessageResponse,
    },
    repositories::GenreRepo,
    utils::{
        html::clean_html,
        session::{AuthUser, RequireAdmin},
    },
};

const DUPLICATE_NAME: &str = "A genre with this name already exists";
const IN_USE: &str = "This genre is still used by movies";

fn not_found() -> AppError {
    AppError::NotFound("This genre does not exist".to_string())
}

#[utoipa::path(
    get,
    path = "/api/genres",
    tag = "genres",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_genres(
    State(pool): State<PgPool>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(GenreRepo::list(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = Genre),
        (status = 404, description = "Not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_genre(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Genre>> {
    let row = GenreRepo::find_by_id(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/genres",
    tag = "genres",
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Created", body = Genre),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_genre(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(mut payload): AppJson<GenreRequest>,
) -> AppResult<Json<Genre>> {
    payload.validate()?;
    payload.description = clean_html(&payload.description);

    let row = GenreRepo::create(&pool, admin.user_id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?;

    tracing::info!(id = row.id, name = %row.name, "Genre created");
    Ok(Json(row))
}

/// Admin only.
#[utoipa::path(
    put,
    path = "/api/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Updated", body = Genre),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_genre(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(mut payload): AppJson<GenreRequest>,
) -> AppResult<Json<Genre>> {
    payload.validate()?;
    payload.description = clean_html(&payload.description);

    let row = GenreRepo::update(&pool, id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?
        .ok_or_else(not_found)?;

    Ok(Json(row))
}

/// Genres linked to a movie cannot be removed until the link is gone.
#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Still in use", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_genre(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = GenreRepo::delete(&pool, id)
        .await
        .map_err(|e| conflict_on(e, Violation::ForeignKey, IN_USE))?;

    if !deleted {
        return Err(not_found());
    }

    tracing::info!(id, "Genre deleted");
    Ok(Json(MessageResponse::new("Genre deleted")))
}
