// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::validate_not_blank;

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    /// Admin who created the category.
    pub user_id: i64,
    /// Unique category name (e.g., "Series", "Feature film").
    pub name: String,
    pub description: String,
}

/// DTO for creating or replacing a category.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
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
    fn name_must_have_visible_characters() {
        let blank = CategoryRequest {
            name: "\t \n".into(),
            description: "Episodic shows".into(),
        };
        assert!(blank.validate().is_err());

        let padded = CategoryRequest {
            name: "  Series ".into(),
            description: "Episodic shows".into(),
        };
        assert!(padded.validate().is_ok());
    }
}
