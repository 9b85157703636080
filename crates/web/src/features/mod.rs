pub mod admin;
pub mod leaderboard;
pub mod members;
pub mod points;
pub mod projects;
pub mod sitemap;
