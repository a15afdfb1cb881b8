//! Call Application Service (Use Case)
//!
//! Orchestrates domain operations for call management.

use std::sync::Arc;

use chrono::Utc;

use calltrack::{Call, CallDraft, CallPatch, CallQuery, CallRepository, CallStats, DomainError};

/// Application service for Call operations
pub struct CallService<R: CallRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CallRepository + ?Sized> CallService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// List calls matching the query, newest first
    pub async fn list(&self, query: &CallQuery) -> Result<Vec<Call>, DomainError> {
        let calls = self.repo.find_all().await?;
        Ok(query.apply(&calls))
    }

    /// Get a call by ID
    pub async fn get(&self, id: &str) -> Result<Call, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))
    }

    /// Create a new call dated today unless the draft says otherwise
    pub async fn create(&self, draft: CallDraft) -> Result<Call, DomainError> {
        let call = Call::from_draft(draft, Call::generate_id(), Utc::now().date_naive())?;
        let saved = self.repo.insert(&call).await?;

        tracing::info!(
            "Created call: {} ({}) - {}",
            saved.prospect_name,
            saved.id,
            saved.outcome
        );

        Ok(saved)
    }

    /// Merge a patch onto an existing call; the id is never changed
    pub async fn update(&self, id: &str, patch: CallPatch) -> Result<Call, DomainError> {
        let updated = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))?;

        tracing::info!("Updated call: {}", updated.id);

        Ok(updated)
    }

    /// Delete a call, returning the removed record
    pub async fn delete(&self, id: &str) -> Result<Call, DomainError> {
        let removed = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Call", id))?;

        tracing::info!("Deleted call: {}", id);

        Ok(removed)
    }

    /// Dashboard figures over the calls matching the query
    pub async fn stats(&self, query: &CallQuery) -> Result<CallStats, DomainError> {
        let calls = self.list(query).await?;
        Ok(CallStats::from_calls(&calls))
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repo.count().await
    }
}
