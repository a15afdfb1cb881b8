//! Call Repository Port
//!
//! Abstract interface for the call store. Implementations own the
//! collection and must serialise mutations: `update` and `delete` run
//! their lookup and write under a single exclusive section.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Call, CallPatch};

/// Repository interface for Call entities
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// All calls, newest first
    async fn find_all(&self) -> Result<Vec<Call>, DomainError>;

    /// Find a call by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Call>, DomainError>;

    /// Prepend a new call. Fails with `Conflict` if the id is taken.
    async fn insert(&self, call: &Call) -> Result<Call, DomainError>;

    /// Merge a patch onto the call with this id.
    /// Returns `Ok(None)` when no such call exists.
    async fn update(&self, id: &str, patch: &CallPatch) -> Result<Option<Call>, DomainError>;

    /// Remove a call, returning it. `Ok(None)` when no such call exists.
    async fn delete(&self, id: &str) -> Result<Option<Call>, DomainError>;

    /// Number of stored calls
    async fn count(&self) -> Result<usize, DomainError>;
}
