//! Repository for the `categories` table.

use sqlx::PgExecutor;

use crate::models::category::{Category, CategoryRequest};

const COLUMNS: &str = "id, user_id, name, description";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Existence check used before a movie may reference the category.
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(executor).await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        input: &CategoryRequest,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        input: &CategoryRequest,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, description = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_optional(executor)
            .await
    }

    /// Returns `true` if the row was deleted.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
