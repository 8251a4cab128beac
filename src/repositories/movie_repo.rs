//! Repository for the `movies` and `movie_genres` tables.

use sqlx::PgExecutor;

use crate::models::movie::{Movie, MovieListParams, MovieRequest};

const COLUMNS: &str = "id, user_id, name, year, category_id, age_category_id, watch_count, \
                       duration_minutes, keywords, description, director, producer, \
                       created_at, updated_at";

pub struct MovieRepo;

impl MovieRepo {
    /// Insert the movie row only; genre links are written by [`MovieRepo::add_genres`].
    ///
    /// `description` is passed separately so callers can hand in a sanitised copy.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
        input: &MovieRequest,
        description: &str,
    ) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies
             (user_id, name, year, category_id, age_category_id, duration_minutes,
              keywords, description, director, producer)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.year)
            .bind(input.category_id)
            .bind(input.age_category_id)
            .bind(input.duration_minutes)
            .bind(&input.keywords)
            .bind(description)
            .bind(&input.director)
            .bind(&input.producer)
            .fetch_one(executor)
            .await
    }

    /// Replace every editable column. Returns `None` if the movie does not exist.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        input: &MovieRequest,
        description: &str,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                name = $2, year = $3, category_id = $4, age_category_id = $5,
                duration_minutes = $6, keywords = $7, description = $8,
                director = $9, producer = $10, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.year)
            .bind(input.category_id)
            .bind(input.age_category_id)
            .bind(input.duration_minutes)
            .bind(&input.keywords)
            .bind(description)
            .bind(&input.director)
            .bind(&input.producer)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Newest first, optionally narrowed to a category and/or a genre name.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        params: &MovieListParams,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies m
             WHERE ($1::BIGINT IS NULL OR m.category_id = $1)
               AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM movie_genres mg
                    JOIN genres g ON g.id = mg.genre_id
                    WHERE mg.movie_id = m.id AND g.name = $2))
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(params.category_id)
            .bind(params.genre.as_deref())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(executor)
            .await
    }

    /// Returns `true` if the row was deleted. Dependent rows go by cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump the watch counter, returning the new total.
    /// `None` means the movie does not exist.
    pub async fn increment_watch_count<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE movies SET watch_count = watch_count + 1
             WHERE id = $1
             RETURNING watch_count",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Link the movie to every id in `genre_ids` in one statement.
    pub async fn add_genres<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
        genre_ids: &[i64],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO movie_genres (movie_id, genre_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT (movie_id, genre_id) DO NOTHING",
        )
        .bind(movie_id)
        .bind(genre_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn clear_genres<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
            .bind(movie_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn genre_names<'e, E: PgExecutor<'e>>(
        executor: E,
        movie_id: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT g.name FROM movie_genres mg
             JOIN genres g ON g.id = mg.genre_id
             WHERE mg.movie_id = $1
             ORDER BY g.name",
        )
        .bind(movie_id)
        .fetch_all(executor)
        .await
    }
}
