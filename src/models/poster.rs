// src/models/poster.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::validate_url_string;

/// Represents the 'posters' table: up to five image URLs per movie.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Poster {
    pub id: i64,
    pub movie_id: i64,
    pub main_poster: String,
    pub second_poster: Option<String>,
    pub third_poster: Option<String>,
    pub fourth_poster: Option<String>,
    pub fifth_poster: Option<String>,
}

/// DTO for setting a movie's posters. Only `main_poster` is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PosterRequest {
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub main_poster: String,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub second_poster: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub third_poster: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub fourth_poster: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub fifth_poster: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_posters_are_checked_when_present() {
        let mut req = PosterRequest {
            main_poster: "https://cdn.example.com/heat.jpg".into(),
            second_poster: None,
            third_poster: None,
            fourth_poster: None,
            fifth_poster: None,
        };
        assert!(req.validate().is_ok());

        req.third_poster = Some("not a url".into());
        assert!(req.validate().is_err());
    }
}
