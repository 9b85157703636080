pub mod leaderboard;
pub mod member;
pub mod points;
pub mod project;
pub mod vote;
