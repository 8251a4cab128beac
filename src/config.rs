// src/config.rs

use std::{env, net::SocketAddr, str::FromStr};

use chrono::Duration;
use dotenvy::dotenv;

/// Upper bound for any configured lifetime: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// HMAC secret for password-reset tokens.
    pub jwt_secret: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Session lifetime in seconds, also used as the cookie `Max-Age`.
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
    /// Lifetime of a verification code and of the reset token minted from it.
    pub reset_code_ttl_secs: u64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            rust_log,
            bind_addr: parsed_or("BIND_ADDR", "0.0.0.0:3000")?,
            session_ttl_secs: ttl_or("SESSION_TTL_SECS", "86400")?,
            cookie_secure: parsed_or("COOKIE_SECURE", "false")?,
            reset_code_ttl_secs: ttl_or("RESET_CODE_TTL_SECS", "900")?,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        capped(self.session_ttl_secs)
    }

    pub fn reset_code_ttl(&self) -> Duration {
        capped(self.reset_code_ttl_secs)
    }
}

fn capped(secs: u64) -> Duration {
    Duration::seconds(secs.min(MAX_TTL_SECS) as i64)
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// A lifetime in seconds, between one second and [`MAX_TTL_SECS`].
fn ttl_or(name: &'static str, default: &str) -> Result<u64, ConfigError> {
    let secs: u64 = parsed_or(name, default)?;
    if secs == 0 || secs > MAX_TTL_SECS {
        return Err(ConfigError::Invalid {
            name,
            value: secs.to_string(),
        });
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_or_falls_back_to_default() {
        let ttl: u64 = parsed_or("MOVIE_CATALOG_UNSET_TTL", "900").unwrap();
        assert_eq!(ttl, 900);

        let addr: SocketAddr = parsed_or("MOVIE_CATALOG_UNSET_ADDR", "127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn parsed_or_rejects_garbage_default() {
        let err = parsed_or::<u64>("MOVIE_CATALOG_UNSET_NUM", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MOVIE_CATALOG_UNSET_NUM", .. }));
    }

    #[test]
    fn ttl_must_be_within_a_year() {
        assert_eq!(ttl_or("MOVIE_CATALOG_UNSET_TTL", "900").unwrap(), 900);

        for bad in ["0", "31536001", "18446744073709551615"] {
            let err = ttl_or("MOVIE_CATALOG_UNSET_TTL", bad).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{bad}");
        }
    }

    #[test]
    fn lifetimes_never_exceed_the_cap() {
        assert_eq!(capped(60), Duration::seconds(60));
        assert_eq!(capped(u64::MAX), Duration::seconds(MAX_TTL_SECS as i64));
    }
}
