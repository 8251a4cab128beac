//! Repository for the `age_categories` table.

use sqlx::PgExecutor;

use crate::models::age_category::{AgeCategory, AgeCategoryRequest};

const COLUMNS: &str = "id, user_id, name, note, min_age, max_age";

pub struct AgeCategoryRepo;

impl AgeCategoryRepo {
    /// Existence check used before a movie may reference the age category.
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM age_categories WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<AgeCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM age_categories ORDER BY min_age, name");
        sqlx::query_as::<_, AgeCategory>(&query)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<AgeCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM age_categories WHERE id = $1");
        sqlx::query_as::<_, AgeCategory>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        input: &AgeCategoryRequest,
    ) -> Result<AgeCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO age_categories (user_id, name, note, min_age, max_age)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AgeCategory>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(&input.note)
            .bind(input.min_age)
            .bind(input.max_age)
            .fetch_one(executor)
            .await
    }

    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        input: &AgeCategoryRequest,
    ) -> Result<Option<AgeCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE age_categories SET name = $2, note = $3, min_age = $4, max_age = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AgeCategory>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.note)
            .bind(input.min_age)
            .bind(input.max_age)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM age_categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
