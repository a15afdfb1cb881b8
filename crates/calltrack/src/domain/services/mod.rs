//! Domain Services
//!
//! Pure functions over call collections.

mod call_query;
mod call_stats;

pub use call_query::*;
pub use call_stats::*;
