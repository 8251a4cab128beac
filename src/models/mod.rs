// src/models/mod.rs

pub mod age_category;
pub mod category;
pub mod code;
pub mod episode;
pub mod favorite;
pub mod genre;
pub mod message;
pub mod movie;
pub mod poster;
pub mod season;
pub mod session;
pub mod user;
