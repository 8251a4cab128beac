// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    docs,
    error::AppError,
    handlers::{
        age_categories, auth, categories, episodes, favorites, genres, movies, posters, profile,
        seasons,
    },
    state::AppState,
    utils::session::session_middleware,
};

/// Assembles the main application router.
///
/// * Public: auth endpoints and the OpenAPI document.
/// * Everything else sits behind the session middleware.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let protected = protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session_middleware,
    ));

    Router::new()
        .nest("/api/auth", auth_routes())
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(protected)
        .method_not_allowed_fallback(auth::method_not_allowed)
        .fallback(route_not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/logout/{session_id}",
            post(auth::logout).fallback(auth::method_not_allowed),
        )
        // No id at all is a bad request, not a missing route.
        .route(
            "/logout",
            post(auth::logout_without_session).fallback(auth::method_not_allowed),
        )
        .route(
            "/logout/",
            post(auth::logout_without_session).fallback(auth::method_not_allowed),
        )
        .route("/forgot-password", post(auth::forgot_password))
        .route("/verify-code", post(auth::verify_code))
        .route("/reset-password", post(auth::reset_password))
}

/// Routes that need a resolved session.
///
/// Handlers read the caller from the `AuthContext` request extension, so the
/// router works with any layer that provides one.
pub fn protected_routes() -> Router<AppState> {
    let profile_routes = Router::new().route(
        "/",
        get(profile::get_profile)
            .put(profile::update_profile)
            .delete(profile::delete_profile),
    );

    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        );

    let age_category_routes = Router::new()
        .route(
            "/",
            get(age_categories::list_age_categories).post(age_categories::create_age_category),
        )
        .route(
            "/{id}",
            get(age_categories::get_age_category)
                .put(age_categories::update_age_category)
                .delete(age_categories::delete_age_category),
        );

    let genre_routes = Router::new()
        .route("/", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/{id}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        );

    let movie_routes = Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/watch/{id}", post(movies::watch_movie))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/{id}/seasons",
            get(seasons::list_seasons).post(seasons::create_season),
        )
        .route(
            "/{id}/posters",
            get(posters::get_posters)
                .put(posters::put_posters)
                .delete(posters::delete_posters),
        );

    let season_routes = Router::new()
        .route(
            "/{id}",
            get(seasons::get_season)
                .put(seasons::update_season)
                .delete(seasons::delete_season),
        )
        .route(
            "/{id}/episodes",
            get(episodes::list_episodes).post(episodes::create_episode),
        );

    let episode_routes = Router::new().route(
        "/{id}",
        get(episodes::get_episode)
            .put(episodes::update_episode)
            .delete(episodes::delete_episode),
    );

    let favorite_routes = Router::new()
        .route("/", get(favorites::list_favorites))
        .route(
            "/{movie_id}",
            post(favorites::add_favorite).delete(favorites::remove_favorite),
        );

    Router::new()
        .nest("/api/profile", profile_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/age-categories", age_category_routes)
        .nest("/api/genres", genre_routes)
        .nest("/api/movies", movie_routes)
        .nest("/api/seasons", season_routes)
        .nest("/api/episodes", episode_routes)
        .nest("/api/favorites", favorite_routes)
        .method_not_allowed_fallback(auth::method_not_allowed)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
