pub mod catalog;
pub mod hashing;
pub mod repositories;
