//! Server configuration from environment variables
//!
//! `.env` is loaded by `main` before this runs. Empty values count as unset.

use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Where calls are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Process memory, seeded from `seed_file` or the bundled sample calls
    Memory { seed_file: Option<PathBuf> },
    /// JSON document rewritten on every change
    JsonFile { path: PathBuf },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: Storage,
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Read `CALLTRACK_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("CALLTRACK_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid CALLTRACK_PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        // A data file wins over a seed file: it is already the full collection.
        let storage = match get("CALLTRACK_DATA_FILE") {
            Some(path) => Storage::JsonFile {
                path: PathBuf::from(path),
            },
            None => Storage::Memory {
                seed_file: get("CALLTRACK_SEED_FILE").map(PathBuf::from),
            },
        };

        Ok(Self {
            host: get("CALLTRACK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            storage,
            api_key: get("CALLTRACK_API_KEY"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
