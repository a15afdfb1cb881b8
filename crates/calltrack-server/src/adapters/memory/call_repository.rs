//! In-memory implementation of CallRepository
//!
//! The collection lives behind a `tokio::sync::RwLock`. Every mutation
//! holds the write guard for its whole lookup-and-modify step, which makes
//! the lock the single writer for the store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use calltrack::{Call, CallPatch, CallRepository, DomainError};

/// Process-lifetime call store, newest call first
#[derive(Default)]
pub struct InMemoryCallRepository {
    calls: RwLock<Vec<Call>>,
}

impl InMemoryCallRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection, kept in the given order
    pub fn with_calls(calls: Vec<Call>) -> Self {
        Self {
            calls: RwLock::new(calls),
        }
    }
}

#[async_trait]
impl CallRepository for InMemoryCallRepository {
    async fn find_all(&self) -> Result<Vec<Call>, DomainError> {
        Ok(self.calls.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Call>, DomainError> {
        let calls = self.calls.read().await;
        Ok(calls.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, call: &Call) -> Result<Call, DomainError> {
        let mut calls = self.calls.write().await;
        if calls.iter().any(|c| c.id == call.id) {
            return Err(DomainError::Conflict(format!(
                "Call id already exists: {}",
                call.id
            )));
        }
        calls.insert(0, call.clone());
        Ok(call.clone())
    }

    async fn update(&self, id: &str, patch: &CallPatch) -> Result<Option<Call>, DomainError> {
        let mut calls = self.calls.write().await;
        let Some(existing) = calls.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.apply(patch)?;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Call>, DomainError> {
        let mut calls = self.calls.write().await;
        Ok(calls
            .iter()
            .position(|c| c.id == id)
            .map(|index| calls.remove(index)))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.calls.read().await.len())
    }
}
