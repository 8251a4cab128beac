// src/models/favorite.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A favorited movie, joined with the movie's basic info.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct FavoriteMovie {
    pub movie_id: i64,
    pub name: String,
    pub year: i32,
    pub added_at: DateTime<Utc>,
}
