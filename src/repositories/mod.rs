//! All SQL lives here: one unit struct per table.
//!
//! Functions take any `PgExecutor`, so the same call runs against the pool or
//! inside a transaction (`&mut *tx`).

pub mod age_category_repo;
pub mod category_repo;
pub mod code_repo;
pub mod episode_repo;
pub mod favorite_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod poster_repo;
pub mod season_repo;
pub mod session_repo;
pub mod user_repo;

pub use age_category_repo::AgeCategoryRepo;
pub use category_repo::CategoryRepo;
pub use code_repo::CodeRepo;
pub use episode_repo::EpisodeRepo;
pub use favorite_repo::FavoriteRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use poster_repo::PosterRepo;
pub use season_repo::SeasonRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
