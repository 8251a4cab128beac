// src/handlers/categories.rs

use axum::{Json, extract::State};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, Violation, conflict_on},
    extract::{AppJson, AppPath},
    models::{
        category::{Category, CategoryRequest},
        message::MessageResponse,
    },
    repositories::CategoryRepo,
    utils::{
        html::clean_html,
        session::{AuthUser, RequireAdmin},
    },
};

const DUPLICATE_NAME: &str = "A category with this name already exists";
const IN_USE: &str = "This category is still used by movies";

fn not_found() -> AppError {
    AppError::NotFound("This category does not exist".to_string())
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_categories(
    State(pool): State<PgPool>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryRepo::list(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_category(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Category>> {
    let row = CategoryRepo::find_by_id(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(row))
}

/// Admin only.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Created", body = Category),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_category(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(mut payload): AppJson<CategoryRequest>,
) -> AppResult<Json<Category>> {
    payload.validate()?;
    payload.description = clean_html(&payload.description);

    let row = CategoryRepo::create(&pool, admin.user_id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?;

    tracing::info!(id = row.id, name = %row.name, "Category created");
    Ok(Json(row))
}

/// Admin only. Replaces every field.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated", body = Category),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_category(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(mut payload): AppJson<CategoryRequest>,
) -> AppResult<Json<Category>> {
    payload.validate()?;
    payload.description = clean_html(&payload.description);

    let row = CategoryRepo::update(&pool, id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?
        .ok_or_else(not_found)?;

    Ok(Json(row))
}

/// Admin only. Refused while movies still reference it.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Still in use", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_category(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = CategoryRepo::delete(&pool, id)
        .await
        .map_err(|e| conflict_on(e, Violation::ForeignKey, IN_USE))?;

    if !deleted {
        return Err(not_found());
    }

    tracing::info!(id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted")))
}
