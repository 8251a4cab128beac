// src/models/code.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Represents the 'codes' table: one-time verification codes for the
/// password-reset flow. `token` is filled in once the code is verified.
/// `attempts` counts verification tries against this row.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationCode {
    pub id: i64,
    pub user_email: String,
    pub code: i32,
    pub token: Option<String>,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
