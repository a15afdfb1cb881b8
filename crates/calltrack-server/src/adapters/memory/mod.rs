//! In-memory Repository Implementations

mod call_repository;

pub use call_repository::InMemoryCallRepository;
