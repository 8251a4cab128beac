// src/models/genre.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::validate_not_blank;

/// Represents the 'genres' table in the database.
/// Genres are looked up by their unique name when movies are created.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenreRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name length must be between 1 and 100 chars"),
        custom(function = validate_not_blank)
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_name_is_rejected() {
        let req = GenreRequest {
            name: "   ".into(),
            description: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
