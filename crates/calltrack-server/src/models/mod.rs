//! Calltrack HTTP Models
//!
//! - Call: request/response DTOs for the call routes
//! - Dashboard: aggregate figures
//! - Envelope: `{ data, success, error }` wrapper shared by every route

mod call;
mod dashboard;
mod envelope;

pub use call::*;
pub use dashboard::*;
pub use envelope::*;
