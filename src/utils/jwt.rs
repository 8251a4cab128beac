// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const RESET_PURPOSE: &str = "password_reset";

/// Claims carried by a password-reset token.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResetClaims {
    /// Subject - the email the verification code was issued for.
    pub sub: String,
    /// Always `password_reset`; tokens minted for anything else are refused.
    pub purpose: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a reset token for `email`, valid for `expiration_seconds`.
pub fn sign_reset_token(
    email: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = ResetClaims {
        sub: email.to_owned(),
        purpose: RESET_PURPOSE.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies a reset token and returns the email it was issued for.
pub fn verify_reset_token(token: &str, secret: &str) -> Result<String, AppError> {
    let invalid = || AppError::BadRequest("Invalid or expired token".to_string());

    let token_data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| invalid())?;

    if token_data.claims.purpose != RESET_PURPOSE {
        return Err(invalid());
    }

    Ok(token_data.claims.sub)
}
