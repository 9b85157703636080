pub mod admin;
pub mod common;
pub mod leaderboard;
pub mod member;
pub mod points;
pub mod project;
pub mod validation;
