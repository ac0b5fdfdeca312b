pub mod comment;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod reference;
pub mod views;
pub mod workouts;
