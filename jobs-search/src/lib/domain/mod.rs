pub mod credential;
pub mod errors;
pub mod job;
pub mod user;
