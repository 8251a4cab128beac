//! Repository for the `posters` table. One poster set per movie.

use sqlx::PgExecutor;

use crate::models::poster::{Poster, PosterRequest};

const COLUMNS: &str =
    "id, movie_id, main_poster, second_poster, third_poster, fourth_poster, fifth_poster";

pub struct PosterRepo;

impl PosterRepo {
    pub async fn find_by_movie<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
    ) -> Result<Option<Poster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posters WHERE movie_id = $1");
        sqlx::query_as::<_, Poster>(&query)
            .bind(movie_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert or replace the movie's poster set.
    pub async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
        input: &PosterRequest,
    ) -> Result<Poster, sqlx::Error> {
        let query = format!(
            "INSERT INTO posters
             (movie_id, main_poster, second_poster, third_poster, fourth_poster, fifth_poster)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (movie_id) DO UPDATE SET
                main_poster = EXCLUDED.main_poster,
                second_poster = EXCLUDED.second_poster,
                third_poster = EXCLUDED.third_poster,
                fourth_poster = EXCLUDED.fourth_poster,
                fifth_poster = EXCLUDED.fifth_poster
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poster>(&query)
            .bind(movie_id)
            .bind(&input.main_poster)
            .bind(&input.second_poster)
            .bind(&input.third_poster)
            .bind(&input.fourth_poster)
            .bind(&input.fifth_poster)
            .fetch_one(executor)
            .await
    }

    pub async fn delete_for_movie<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posters WHERE movie_id = $1")
            .bind(movie_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
