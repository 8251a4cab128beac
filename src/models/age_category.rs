// src/models/age_category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, utils::validate::validate_not_blank};

/// Represents the 'age_categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct AgeCategory {
    pub id: i64,
    pub user_id: i64,
    /// Unique rating label (e.g., "PG-13").
    pub name: String,
    pub note: Option<String>,
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AgeCategoryRequest {
    #[validate(
        length(min = 1, max = 50, message = "Name length must be between 1 and 50 chars"),
        custom(function = validate_not_blank)
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Note is too long"))]
    pub note: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Ages must be between 0 and 150"))]
    pub min_age: i32,
    #[validate(range(min = 0, max = 150, message = "Ages must be between 0 and 150"))]
    pub max_age: i32,
}

impl AgeCategoryRequest {
    /// Field validation plus the cross-field `min_age <= max_age` rule.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.min_age > self.max_age {
            return Err(AppError::BadRequest(
                "min_age cannot be greater than max_age".to_string(),
            ));
        }
        Ok(())
    }
}
