mod in_memory;
mod user;

pub use in_memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
