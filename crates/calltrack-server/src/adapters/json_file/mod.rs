//! JSON file Repository Implementations

mod call_repository;

pub use call_repository::JsonFileCallRepository;
