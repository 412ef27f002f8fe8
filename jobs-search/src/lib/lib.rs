pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::user;
pub use outbound::repositories;
