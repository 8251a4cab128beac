// src/handlers/movies.rs

use axum::{Json, extract::State};
use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    extract::{AppJson, AppPath, AppQuery},
    models::{
        message::MessageResponse,
        movie::{Movie, MovieDetails, MovieListParams, MovieRequest},
    },
    repositories::{AgeCategoryRepo, CategoryRepo, GenreRepo, MovieRepo, PosterRepo},
    utils::{
        html::clean_html,
        session::{AuthUser, RequireAdmin},
    },
};

pub(crate) fn movie_not_found() -> AppError {
    AppError::NotFound("Movie not found".to_string())
}

/// Resolves every reference a movie payload makes.
///
/// Runs inside the caller's transaction so the rows checked here cannot
/// disappear before the insert. Returns the genre ids in payload order.
async fn resolve_references(
    conn: &mut PgConnection,
    payload: &MovieRequest,
    genre_names: &[String],
) -> AppResult<Vec<i64>> {
    if !AgeCategoryRepo::exists(&mut *conn, payload.age_category_id).await? {
        return Err(AppError::NotFound(
            "This age category does not exist".to_string(),
        ));
    }
    if !CategoryRepo::exists(&mut *conn, payload.category_id).await? {
        return Err(AppError::NotFound("This category does not exist".to_string()));
    }

    let mut genre_ids = Vec::with_capacity(genre_names.len());
    for name in genre_names {
        let id = GenreRepo::find_id_by_name(&mut *conn, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("This genre ({name}) does not exists")))?;
        genre_ids.push(id);
    }
    Ok(genre_ids)
}

/// Checks shared by create and replace. Returns the cleaned genre names.
fn check_payload(payload: &MovieRequest) -> AppResult<Vec<String>> {
    let genre_names = payload.genre_names();
    if genre_names.is_empty() {
        return Err(AppError::BadRequest(
            "At least one genre is required".to_string(),
        ));
    }
    payload.validate()?;
    Ok(genre_names)
}

/// List movies, newest first.
#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "movies",
    params(MovieListParams),
    responses(
        (status = 200, description = "A page of movies", body = Vec<Movie>),
        (status = 400, description = "Bad query", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_movies(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppQuery(params): AppQuery<MovieListParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list(&pool, &params).await?;
    Ok(Json(movies))
}

/// One movie with its genre names and posters.
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie details", body = MovieDetails),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_movie(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MovieDetails>> {
    let movie = MovieRepo::find_by_id(&pool, id)
        .await?
        .ok_or_else(movie_not_found)?;
    let genres = MovieRepo::genre_names(&pool, id).await?;
    let posters = PosterRepo::find_by_movie(&pool, id).await?;

    Ok(Json(MovieDetails {
        movie,
        genres,
        posters,
    }))
}

/// Creates a movie and links it to its genres.
///
/// Admin only. The category, the age category and every genre name must
/// already exist. The movie row and its genre links are written in one
/// transaction, so a failed lookup leaves nothing behind.
#[utoipa::path(
    post,
    path = "/api/movies",
    tag = "movies",
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Movie created", body = MessageResponse),
        (status = 400, description = "Malformed body or no genres", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Unknown category, age category or genre", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_movie(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(payload): AppJson<MovieRequest>,
) -> AppResult<Json<MessageResponse>> {
    let genre_names = check_payload(&payload)?;
    let description = clean_html(&payload.description);

    let mut tx = pool.begin().await?;

    let genre_ids = resolve_references(&mut tx, &payload, &genre_names).await?;
    let movie = MovieRepo::create(&mut *tx, admin.user_id, &payload, &description).await?;
    MovieRepo::add_genres(&mut *tx, movie.id, &genre_ids).await?;

    tx.commit().await?;

    tracing::info!(movie_id = movie.id, user_id = admin.user_id, "Movie created");
    Ok(Json(MessageResponse::new("Movie Created")))
}

/// Replaces every field of a movie, genres included.
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Updated movie", body = MovieDetails),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Movie or a reference not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_movie(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<MovieRequest>,
) -> AppResult<Json<MovieDetails>> {
    let genre_names = check_payload(&payload)?;
    let description = clean_html(&payload.description);

    let mut tx = pool.begin().await?;

    if !MovieRepo::exists(&mut *tx, id).await? {
        return Err(movie_not_found());
    }
    let genre_ids = resolve_references(&mut tx, &payload, &genre_names).await?;

    let movie = MovieRepo::update(&mut *tx, id, &payload, &description)
        .await?
        .ok_or_else(movie_not_found)?;
    MovieRepo::clear_genres(&mut *tx, id).await?;
    MovieRepo::add_genres(&mut *tx, id, &genre_ids).await?;

    let genres = MovieRepo::genre_names(&mut *tx, id).await?;
    let posters = PosterRepo::find_by_movie(&mut *tx, id).await?;

    tx.commit().await?;

    tracing::info!(movie_id = id, "Movie updated");
    Ok(Json(MovieDetails {
        movie,
        genres,
        posters,
    }))
}

/// Deletes a movie. Seasons, episodes, posters, favorites and genre links
/// go with it.
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 401, description = "Admin role required", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_movie(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !MovieRepo::delete(&pool, id).await? {
        return Err(movie_not_found());
    }

    tracing::info!(movie_id = id, "Movie deleted");
    Ok(Json(MessageResponse::new("Movie deleted")))
}

/// Counts one more watch of a movie and reports the new total.
#[utoipa::path(
    post,
    path = "/api/movies/watch/{id}",
    tag = "movies",
    params(("id" = String, Path, description = "Movie id, numeric")),
    responses(
        (status = 200, description = "New total, e.g. `Total watches: 3`", body = MessageResponse),
        (status = 400, description = "Non-numeric id", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Movie not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn watch_movie(
    State(pool): State<PgPool>,
    AuthUser(auth): AuthUser,
    AppPath(raw_id): AppPath<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_movie_id(&raw_id)?;

    let total = MovieRepo::increment_watch_count(&pool, id)
        .await?
        .ok_or_else(movie_not_found)?;

    tracing::debug!(movie_id = id, user_id = auth.user_id, total, "Watch counted");
    Ok(Json(MessageResponse::new(format!("Total watches: {total}"))))
}

fn parse_movie_id(raw: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest("Movie id must be a number".to_string())),
    }
}
