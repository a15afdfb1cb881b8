//! JSON file implementation of CallRepository
//!
//! Keeps the collection in memory and rewrites the whole document after
//! each mutation (temp file + rename). If the write fails the in-memory
//! change is rolled back, so memory and disk never disagree.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use calltrack::{Call, CallPatch, CallRepository, DomainError, SeedDocument};

/// File-backed call store
pub struct JsonFileCallRepository {
    path: PathBuf,
    calls: RwLock<Vec<Call>>,
}

/// Borrowed view of `SeedDocument` for writing without cloning
#[derive(Serialize)]
struct DocumentRef<'a> {
    calls: &'a [Call],
}

impl JsonFileCallRepository {
    /// Open the data file. A missing file starts an empty store; it is
    /// created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let calls = match tokio::fs::read_to_string(&path).await {
            Ok(content) => SeedDocument::parse(&content)?.calls,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No data file at {:?}, starting empty", path);
                Vec::new()
            }
            Err(e) => {
                return Err(DomainError::Repository(format!(
                    "Failed to read data file {:?}: {}",
                    path, e
                )))
            }
        };

        tracing::info!("Opened call store {:?} ({} calls)", path, calls.len());

        Ok(Self {
            path,
            calls: RwLock::new(calls),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, calls: &[Call]) -> Result<(), DomainError> {
        let content = serde_json::to_string_pretty(&DocumentRef { calls })
            .map_err(|e| DomainError::Repository(format!("Failed to serialize calls: {}", e)))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error("create directory", dir, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| io_error("write", &tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error("replace", &self.path, e))?;

        Ok(())
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::Repository(format!("Failed to {} {:?}: {}", action, path, e))
}

#[async_trait]
impl CallRepository for JsonFileCallRepository {
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
        if let Err(e) = self.persist(&calls).await {
            calls.remove(0);
            return Err(e);
        }

        Ok(call.clone())
    }

    async fn update(&self, id: &str, patch: &CallPatch) -> Result<Option<Call>, DomainError> {
        let mut calls = self.calls.write().await;
        let Some(index) = calls.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let previous = calls[index].clone();
        calls[index].apply(patch)?;
        if let Err(e) = self.persist(&calls).await {
            calls[index] = previous;
            return Err(e);
        }

        Ok(Some(calls[index].clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Call>, DomainError> {
        let mut calls = self.calls.write().await;
        let Some(index) = calls.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        let removed = calls.remove(index);
        if let Err(e) = self.persist(&calls).await {
            calls.insert(index, removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.calls.read().await.len())
    }
}
