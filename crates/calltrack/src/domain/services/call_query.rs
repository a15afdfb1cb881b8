//! CallQuery - Free-text search and outcome filter over a call list
//!
//! Search is a case-insensitive substring match against prospect name,
//! company and notes. The status filter compares the outcome exactly;
//! `"all"` disables it. Both filters combine with AND.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Call;

/// Status value that disables outcome filtering
pub const STATUS_ALL: &str = "all";

/// Filter parameters for listing calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl CallQuery {
    pub fn new(search: Option<String>, status: Option<String>) -> Self {
        Self { search, status }
    }

    /// Lower-cased, trimmed search term, if any
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn outcome(&self) -> Option<&str> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != STATUS_ALL)
    }

    /// True when neither filter would drop anything
    pub fn is_noop(&self) -> bool {
        self.needle().is_none() && self.outcome().is_none()
    }

    pub fn matches(&self, call: &Call) -> bool {
        self.matches_with(self.needle().as_deref(), call)
    }

    fn matches_with(&self, needle: Option<&str>, call: &Call) -> bool {
        if let Some(needle) = needle {
            let hit = [&call.prospect_name, &call.company, &call.notes]
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }
        match self.outcome() {
            Some(status) => call.outcome.as_str() == status,
            None => true,
        }
    }

    /// Matching calls in input order. The input is left untouched.
    pub fn apply(&self, calls: &[Call]) -> Vec<Call> {
        if self.is_noop() {
            return calls.to_vec();
        }
        let needle = self.needle();
        let filtered: Vec<Call> = calls
            .iter()
            .filter(|call| self.matches_with(needle.as_deref(), call))
            .cloned()
            .collect();

        tracing::debug!(
            search = ?self.search,
            status = ?self.status,
            "Filtered calls: {} of {}",
            filtered.len(),
            calls.len()
        );

        filtered
    }
}
