//! Repository for the `genres` table.

use sqlx::PgExecutor;

use crate::models::genre::{Genre, GenreRequest};

const COLUMNS: &str = "id, user_id, name, description";

pub struct GenreRepo;

impl GenreRepo {
    /// Resolve a genre name to its id. Names match exactly.
    pub async fn find_id_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY name");
        sqlx::query_as::<_, Genre>(&query).fetch_all(executor).await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        input: &GenreRequest,
    ) -> Result<Genre, sqlx::Error> {
        let query = format!(
            "INSERT INTO genres (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        input: &GenreRequest,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET name = $2, description = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
