//! Calltrack API Routes
//!
//! - /api/calls - Call listing, search and CRUD
//! - /api/dashboard - Aggregate figures over (filtered) calls

pub mod call;
pub mod dashboard;
pub mod swagger;
