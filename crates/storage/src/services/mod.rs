pub mod avatar;
pub mod points;
