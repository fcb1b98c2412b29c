//! Repository adapters for the usuarios collection.

pub mod document;
pub mod memory_repo;
pub mod mongo_repo;
pub mod unavailable;

pub use memory_repo::InMemoryUsersRepository;
pub use mongo_repo::MongoUsersRepository;
pub use unavailable::UnavailableUsersRepository;
