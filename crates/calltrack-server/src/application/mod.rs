//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations on top of the call repository.

mod call_service;

pub use call_service::CallService;
