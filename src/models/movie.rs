// src/models/movie.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::validate::validate_not_blank;

use super::poster::Poster;

/// Represents the 'movies' table in the database.
/// Series are movies with seasons attached.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Movie {
    pub id: i64,
    /// Admin who created the entry.
    pub user_id: i64,
    pub name: String,
    pub year: i32,
    pub category_id: i64,
    pub age_category_id: i64,
    pub watch_count: i64,
    pub duration_minutes: i32,
    /// Free-form search keywords, comma separated by convention.
    pub keywords: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A movie together with its genre names and poster set.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Vec<String>,
    pub posters: Option<Poster>,
}

/// DTO for creating a movie, or replacing one wholesale.
///
/// Genres are referenced by name; each must already exist.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MovieRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name length must be between 1 and 200 chars"),
        custom(function = validate_not_blank)
    )]
    pub name: String,
    #[validate(range(min = 1800, max = 2200, message = "Year is out of range"))]
    pub year: i32,
    pub category_id: i64,
    pub age_category_id: i64,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_minutes: i32,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Keywords are too long"))]
    pub keywords: String,
    #[serde(default)]
    #[validate(length(max = 20000, message = "Description is too long"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Director is too long"))]
    pub director: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Producer is too long"))]
    pub producer: String,
    #[serde(default)]
    #[schema(example = json!(["Action"]))]
    pub genres: Vec<String>,
}

impl MovieRequest {
    /// Genre names trimmed, blanks dropped and duplicates removed, first occurrence wins.
    pub fn genre_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.genres.len());
        for name in self.genres.iter().map(|g| g.trim()) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Query parameters for listing movies.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieListParams {
    /// Only movies in this category.
    pub category_id: Option<i64>,
    /// Only movies tagged with this genre name.
    pub genre: Option<String>,
    /// Number of items to return (default: 20, max: 100).
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MovieListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(genres: &[&str]) -> MovieRequest {
        MovieRequest {
            name: "Heat".into(),
            year: 1995,
            category_id: 1,
            age_category_id: 2,
            duration_minutes: 170,
            keywords: "heist, la".into(),
            description: String::new(),
            director: "Michael Mann".into(),
            producer: "Art Linson".into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn genre_names_are_trimmed_and_deduplicated() {
        let req = request(&[" Action", "Crime", "Action ", "  "]);
        assert_eq!(req.genre_names(), vec!["Action", "Crime"]);
    }

    #[test]
    fn blank_genres_count_as_none() {
        assert!(request(&["", " "]).genre_names().is_empty());
    }

    #[test]
    fn blank_title_fails_validation() {
        let mut req = request(&["Crime"]);
        req.name = "  ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn list_limit_is_clamped() {
        let params = MovieListParams {
            limit: Some(500),
            offset: Some(-3),
            ..Default::default()
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
        assert_eq!(MovieListParams::default().limit(), 20);
    }
}
