//! Repository for the `seasons` table.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::season::{Season, SeasonRequest};

const COLUMNS: &str = "id, user_id, movie_id, season_number, name, description, release_date";

pub struct SeasonRepo;

impl SeasonRepo {
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM seasons WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn list_for_movie<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
    ) -> Result<Vec<Season>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM seasons WHERE movie_id = $1 ORDER BY season_number, id");
        sqlx::query_as::<_, Season>(&query)
            .bind(movie_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE id = $1");
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        movie_id: i64,
        input: &SeasonRequest,
        description: &str,
        release_date: NaiveDate,
    ) -> Result<Season, sqlx::Error> {
        let query = format!(
            "INSERT INTO seasons (user_id, movie_id, season_number, name, description, release_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Season>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(input.season_number)
            .bind(input.name.trim())
            .bind(description)
            .bind(release_date)
            .fetch_one(executor)
            .await
    }

    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        input: &SeasonRequest,
        description: &str,
        release_date: NaiveDate,
    ) -> Result<Option<Season>, sqlx::Error> {
        let query = format!(
            "UPDATE seasons SET season_number = $2, name = $3, description = $4, release_date = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .bind(input.season_number)
            .bind(input.name.trim())
            .bind(description)
            .bind(release_date)
            .fetch_optional(executor)
            .await
    }

    /// Returns `true` if the row was deleted. Episodes go by cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
