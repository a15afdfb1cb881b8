//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Call: Sales call record
//! - CallDraft / CallPatch: Unvalidated create and update input
//! - SeedDocument: Initial call collection loaded at startup

mod call;
mod seed;

pub use call::*;
pub use seed::*;
