//! Component Loader error types

use std::path::PathBuf;

use contracts::ComponentKind;
use thiserror::Error;

/// Component Loader specific error
#[derive(Debug, Error)]
pub enum LoadError {
    /// Artifact could not be opened or read
    #[error("unable to read artifact '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not a native library for this platform
    #[error("artifact '{}' cannot be bound: {detail}", path.display())]
    Incompatible { path: PathBuf, detail: String },

    /// Artifact bound but no factory is registered under the name
    #[error("no factory registered for component '{name}'")]
    NotFound { name: String },

    /// Factory registered against another collaborator ABI revision
    #[error("component '{name}' built for ABI {found}, launcher expects ABI {expected}")]
    AbiMismatch {
        name: String,
        expected: u32,
        found: u32,
    },

    /// Component lacks the entry type the caller needs
    #[error("component '{name}' has no {expected} entry (provides {found})")]
    EntryMissing {
        name: String,
        expected: ComponentKind,
        found: ComponentKind,
    },
}

impl LoadError {
    /// Create incompatible-binary error
    pub fn incompatible(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Incompatible {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, LoadError>;
