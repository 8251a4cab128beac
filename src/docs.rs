// src/docs.rs

use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::{
    handlers::{
        age_categories, auth, categories, episodes, favorites, genres, movies, posters, profile,
        seasons,
    },
    models::{
        age_category::{AgeCategory, AgeCategoryRequest},
        category::{Category, CategoryRequest},
        episode::{Episode, EpisodeRequest},
        favorite::FavoriteMovie,
        genre::{Genre, GenreRequest},
        message::MessageResponse,
        movie::{Movie, MovieDetails, MovieRequest},
        poster::{Poster, PosterRequest},
        season::{Season, SeasonRequest},
        user::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
            ResetPasswordRequest, TokenResponse, UpdateProfileRequest, User, VerifyCodeRequest,
        },
    },
    utils::session::SESSION_COOKIE,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Movie Catalog API", description = "Movies, series and user favorites"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::forgot_password,
        auth::verify_code,
        auth::reset_password,
        profile::get_profile,
        profile::update_profile,
        profile::delete_profile,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        age_categories::list_age_categories,
        age_categories::get_age_category,
        age_categories::create_age_category,
        age_categories::update_age_category,
        age_categories::delete_age_category,
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        movies::watch_movie,
        seasons::list_seasons,
        seasons::create_season,
        seasons::get_season,
        seasons::update_season,
        seasons::delete_season,
        episodes::list_episodes,
        episodes::create_episode,
        episodes::get_episode,
        episodes::update_episode,
        episodes::delete_episode,
        posters::get_posters,
        posters::put_posters,
        posters::delete_posters,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
    ),
    components(schemas(
        MessageResponse,
        User,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        UpdateProfileRequest,
        ForgotPasswordRequest,
        VerifyCodeRequest,
        TokenResponse,
        ResetPasswordRequest,
        Category,
        CategoryRequest,
        AgeCategory,
        AgeCategoryRequest,
        Genre,
        GenreRequest,
        Movie,
        MovieDetails,
        MovieRequest,
        Poster,
        PosterRequest,
        Season,
        SeasonRequest,
        Episode,
        EpisodeRequest,
        FavoriteMovie,
    )),
    modifiers(&SessionCookieScheme),
    tags(
        (name = "auth", description = "Accounts, sessions and password reset"),
        (name = "profile", description = "The caller's own account"),
        (name = "movies", description = "Movies and series"),
    )
)]
pub struct ApiDoc;

/// Registers the `session_cookie` scheme referenced by protected paths.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_movie_routes_and_cookie_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/movies"));
        assert!(doc.paths.paths.contains_key("/api/movies/watch/{id}"));
        assert!(doc.paths.paths.contains_key("/api/auth/logout/{session_id}"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("session_cookie"));
    }
}
