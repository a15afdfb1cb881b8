//! Calltrack Domain Library
//!
//! Core domain types and interfaces for the Calltrack sales-call tracker.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Call, CallDraft, CallPatch)
//!   - `value_objects/`: Immutable value types (Outcome, CallStatus)
//!   - `services/`: Pure functions over call lists (CallQuery, CallStats)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Call store interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use calltrack::{Call, CallQuery, CallRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Call, CallDraft, CallPatch, CallQuery, CallStats, CallStatus, DomainError, Outcome,
    OutcomeCount, SeedDocument, STATUS_ALL,
};
pub use ports::CallRepository;
