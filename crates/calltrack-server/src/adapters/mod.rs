//! Infrastructure Adapters
//!
//! Implementations of the call store port.

pub mod json_file;
pub mod memory;
pub mod seed;

// Re-exports
pub use json_file::JsonFileCallRepository;
pub use memory::InMemoryCallRepository;
pub use seed::{bundled_seed, load_seed_file};
