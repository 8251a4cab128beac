// src/models/episode.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::validate_url_string;

/// Represents the 'episodes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Episode {
    pub id: i64,
    pub user_id: i64,
    pub season_id: i64,
    /// Where the episode is streamed from.
    pub url: String,
    pub episode_number: i32,
    pub name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EpisodeRequest {
    #[validate(length(min = 1, max = 500), custom(function = validate_url_string))]
    pub url: String,
    #[validate(range(min = 1, message = "Episode number must be positive"))]
    pub episode_number: i32,
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_minutes: Option<i32>,
    /// Calendar date, `YYYY-MM-DD`.
    pub release_date: Option<String>,
    #[validate(length(max = 20000, message = "Description is too long"))]
    pub description: Option<String>,
}
