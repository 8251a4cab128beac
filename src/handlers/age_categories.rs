// src/handlers/age_categories.rs

use axum::{Json, extract::State};
use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult, Violation, conflict_on},
    extract::{AppJson, AppPath},
    models::{
        age_category::{AgeCategory, AgeCategoryRequest},
        message::MessageResponse,
    },
    repositories::AgeCategoryRepo,
    utils::{
        html::clean_optional_html,
        session::{AuthUser, RequireAdmin},
    },
};

const DUPLICATE_NAME: &str = "An age category with this name already exists";
const IN_USE: &str = "This age category is still used by movies";

fn not_found() -> AppError {
    AppError::NotFound("This age category does not exist".to_string())
}

#[utoipa::path(
    get,
    path = "/api/age-categories",
    tag = "age-categories",
    responses(
        (status = 200, description = "All age categories", body = Vec<AgeCategory>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn list_age_categories(
    State(pool): State<PgPool>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<AgeCategory>>> {
    Ok(Json(AgeCategoryRepo::list(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/age-categories/{id}",
    tag = "age-categories",
    params(("id" = i64, Path, description = "Age category id")),
    responses(
        (status = 200, description = "The age category", body = AgeCategory),
        (status = 404, description = "Not found", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn get_age_category(
    State(pool): State<PgPool>,
    _auth: AuthUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<AgeCategory>> {
    let row = AgeCategoryRepo::find_by_id(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(row))
}

/// Admin only.
#[utoipa::path(
    post,
    path = "/api/age-categories",
    tag = "age-categories",
    request_body = AgeCategoryRequest,
    responses(
        (status = 200, description = "Created", body = AgeCategory),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn create_age_category(
    State(pool): State<PgPool>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(mut payload): AppJson<AgeCategoryRequest>,
) -> AppResult<Json<AgeCategory>> {
    payload.check()?;
    payload.note = clean_optional_html(payload.note.as_deref());

    let row = AgeCategoryRepo::create(&pool, admin.user_id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?;

    tracing::info!(id = row.id, name = %row.name, "Age category created");
    Ok(Json(row))
}

/// Admin only. Replaces every field.
#[utoipa::path(
    put,
    path = "/api/age-categories/{id}",
    tag = "age-categories",
    params(("id" = i64, Path, description = "Age category id")),
    request_body = AgeCategoryRequest,
    responses(
        (status = 200, description = "Updated", body = AgeCategory),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn update_age_category(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
    AppJson(mut payload): AppJson<AgeCategoryRequest>,
) -> AppResult<Json<AgeCategory>> {
    payload.check()?;
    payload.note = clean_optional_html(payload.note.as_deref());

    let row = AgeCategoryRepo::update(&pool, id, &payload)
        .await
        .map_err(|e| conflict_on(e, Violation::Unique, DUPLICATE_NAME))?
        .ok_or_else(not_found)?;

    Ok(Json(row))
}

/// Admin only. Refused while movies still reference it.
#[utoipa::path(
    delete,
    path = "/api/age-categories/{id}",
    tag = "age-categories",
    params(("id" = i64, Path, description = "Age category id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse),
        (status = 409, description = "Still in use", body = MessageResponse),
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_age_category(
    State(pool): State<PgPool>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = AgeCategoryRepo::delete(&pool, id)
        .await
        .map_err(|e| conflict_on(e, Violation::ForeignKey, IN_USE))?;

    if !deleted {
        return Err(not_found());
    }

    tracing::info!(id, "Age category deleted");
    Ok(Json(MessageResponse::new("Age category deleted")))
}
