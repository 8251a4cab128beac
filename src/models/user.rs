// src/models/user.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validate::validate_phone;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct User {
    pub id: i64,

    /// Unique login email.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    /// User role: 'user' or 'admin'.
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Set when the account is soft-deleted; such accounts cannot log in.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// DTO for creating a new account (Registration).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(max = 16, message = "Name is too long"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub session_id: Uuid,
}

/// Short profile payload accepted by `PUT /api/profile`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(max = 16, message = "Name is too long"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = validate_phone))]
    pub phone: String,

    /// Calendar date, `YYYY-MM-DD`.
    #[schema(example = "1990-04-21")]
    pub date_of_birth: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(range(min = 100_000, max = 999_999, message = "Invalid code"))]
    pub code: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, phone: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            date_of_birth: "1990-04-21".to_string(),
        }
    }

    #[test]
    fn name_is_capped_at_sixteen_characters() {
        assert!(profile("Sixteen chars ok", "").validate().is_ok());
        assert!(profile("Seventeen chars!!", "").validate().is_err());
    }

    #[test]
    fn name_cap_counts_characters_not_bytes() {
        // 16 characters, 32 bytes
        assert!(profile("ЖЖЖЖЖЖЖЖЖЖЖЖЖЖЖЖ", "").validate().is_ok());
    }

    #[test]
    fn phone_must_look_like_a_number() {
        assert!(profile("Ana", "+44 20 7946 0958").validate().is_ok());
        assert!(profile("Ana", "not a phone").validate().is_err());
    }

    #[test]
    fn user_serialization_hides_secrets() {
        let user = User {
            id: 1,
            email: "ana@example.com".into(),
            password: "$argon2id$hash".into(),
            name: Some("Ana".into()),
            phone: None,
            date_of_birth: None,
            role: ROLE_USER.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["email"], "ana@example.com");
    }
}
