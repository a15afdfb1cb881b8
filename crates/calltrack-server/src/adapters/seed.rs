//! Seed document loading

use std::path::Path;

use calltrack::{Call, DomainError, SeedDocument};

/// Sample calls shipped with the server, used when no seed file is configured
const BUNDLED_SEED: &str = include_str!("../../data/calls.json");

/// Calls from the bundled sample document
pub fn bundled_seed() -> Result<Vec<Call>, DomainError> {
    let doc = SeedDocument::parse(BUNDLED_SEED)?;
    tracing::info!("Loaded {} bundled seed calls", doc.calls.len());
    Ok(doc.calls)
}

/// Read a `{ "calls": [...] }` document from disk
pub async fn load_seed_file(path: &Path) -> Result<Vec<Call>, DomainError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::Repository(format!("Failed to read seed file {:?}: {}", path, e))
    })?;

    let doc = SeedDocument::parse(&content)?;
    tracing::info!("Loaded {} seed calls from {:?}", doc.calls.len(), path);

    Ok(doc.calls)
}
