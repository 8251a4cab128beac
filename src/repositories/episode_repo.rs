//! Repository for the `episodes` table.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::episode::{Episode, EpisodeRequest};

const COLUMNS: &str = "id, user_id, season_id, url, episode_number, name, duration_minutes, \
                       release_date, description";

/// Episode fields after date parsing and sanitisation.
pub struct EpisodeFields<'a> {
    pub input: &'a EpisodeRequest,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
}

pub struct EpisodeRepo;

impl EpisodeRepo {
    pub async fn list_for_season<'e, E: PgExecutor<'e>>(
        executor: E,
        season_id: i64,
    ) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM episodes WHERE season_id = $1 ORDER BY episode_number, id"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(season_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        season_id: i64,
        fields: &EpisodeFields<'_>,
    ) -> Result<Episode, sqlx::Error> {
        let query = format!(
            "INSERT INTO episodes
             (user_id, season_id, url, episode_number, name, duration_minutes, release_date, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(user_id)
            .bind(season_id)
            .bind(&fields.input.url)
            .bind(fields.input.episode_number)
            .bind(&fields.input.name)
            .bind(fields.input.duration_minutes)
            .bind(fields.release_date)
            .bind(&fields.description)
            .fetch_one(executor)
            .await
    }

    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        fields: &EpisodeFields<'_>,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET
                url = $2, episode_number = $3, name = $4, duration_minutes = $5,
                release_date = $6, description = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .bind(&fields.input.url)
            .bind(fields.input.episode_number)
            .bind(&fields.input.name)
            .bind(fields.input.duration_minutes)
            .bind(fields.release_date)
            .bind(&fields.description)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
