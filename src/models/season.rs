// src/models/season.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::validate_not_blank;

/// Represents the 'seasons' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Season {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub season_number: i32,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SeasonRequest {
    #[validate(range(min = 1, message = "Season number must be positive"))]
    pub season_number: i32,
    #[validate(
        length(min = 1, max = 200, message = "Name length must be between 1 and 200 chars"),
        custom(function = validate_not_blank)
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 20000, message = "Description is too long"))]
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub release_date: String,
}
