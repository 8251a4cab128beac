// src/main.rs

use std::time::Duration;

use anyhow::Context;
use movie_catalog::config::Config;
use movie_catalog::models::user::ROLE_ADMIN;
use movie_catalog::repositories::{CodeRepo, SessionRepo, UserRepo};
use movie_catalog::routes;
use movie_catalog::state::AppState;
use movie_catalog::utils::hash::hash_password;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CONNECT_RETRIES: u32 = 5;
const CLEANUP_EVERY: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let pool = connect_with_retry(&config.database_url).await?;
    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Migrations applied successfully.");

    if let Err(e) = seed_admin_user(&pool, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    spawn_expiry_cleanup(pool.clone());

    let addr = config.bind_addr;
    let state = AppState::new(pool, config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn connect_with_retry(database_url: &str) -> anyhow::Result<PgPool> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > CONNECT_RETRIES {
                    return Err(e).context(format!(
                        "failed to connect to database after {CONNECT_RETRIES} retries"
                    ));
                }
                tracing::warn!(
                    "Database not ready, retrying in 2s... (Attempt {})",
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Creates the admin account named by `ADMIN_EMAIL` / `ADMIN_PASSWORD` if it is missing.
async fn seed_admin_user(pool: &PgPool, config: &Config) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    if UserRepo::find_active_by_email(pool, &email).await?.is_none() {
        tracing::info!("Seeding admin user: {}", email);
        let hashed_password = hash_password(password)?;
        UserRepo::create(pool, &email, &hashed_password, Some("admin"), ROLE_ADMIN).await?;
        tracing::info!("Admin user created successfully.");
    }
    Ok(())
}

/// Deletes expired sessions and verification codes now and then every hour.
fn spawn_expiry_cleanup(pool: PgPool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_EVERY);
        loop {
            interval.tick().await;
            match SessionRepo::cleanup_expired(&pool).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Expired sessions removed"),
                Err(e) => tracing::warn!("Session cleanup failed: {:?}", e),
            }
            match CodeRepo::cleanup_expired(&pool).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Expired verification codes removed"),
                Err(e) => tracing::warn!("Code cleanup failed: {:?}", e),
            }
        }
    });
}
