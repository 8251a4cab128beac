// src/handlers/mod.rs

pub mod age_categories;
pub mod auth;
pub mod categories;
pub mod episodes;
pub mod favorites;
pub mod genres;
pub mod movies;
pub mod posters;
pub mod profile;
pub mod seasons;
