//! Repository for the `favorites` table.

use sqlx::PgExecutor;

use crate::models::favorite::FavoriteMovie;

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Returns `false` if the movie was already a favorite.
    pub async fn add<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        movie_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorites (user_id, movie_id) VALUES ($1, $2)
             ON CONFLICT (user_id, movie_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn remove<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        movie_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Most recently added first.
    pub async fn list_for_user<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
    ) -> Result<Vec<FavoriteMovie>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteMovie>(
            "SELECT f.movie_id, m.name, m.year, f.added_at
             FROM favorites f
             JOIN movies m ON m.id = f.movie_id
             WHERE f.user_id = $1
             ORDER BY f.added_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }
}
