// src/utils/validate.rs

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use url::Url;
use validator::ValidationError;

use crate::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()\- ]{0,20}$").expect("phone pattern is valid"));

/// Parses a calendar date written exactly as `YYYY-MM-DD`.
///
/// chrono alone accepts single-digit months and days, so the shape is checked first.
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    let invalid =
        || AppError::BadRequest("Invalid date, please use format `YYYY-MM-DD`".to_string());

    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    value.map(parse_date).transpose()
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(phone) {
        return Err(ValidationError::new("invalid_phone").with_message("Invalid phone number".into()));
    }
    Ok(())
}

/// Rejects names made only of whitespace. Names are stored trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Name cannot be blank".into()));
    }
    Ok(())
}

/// Validates that a string is an absolute http(s) URL.
pub fn validate_url_string(url: &str) -> Result<(), ValidationError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("invalid_url").with_message("Invalid URL".into())),
    }
}
