//! Artifact Resolver error types

use std::path::PathBuf;

use thiserror::Error;

/// Why an artifact could not be verified
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Library path argument is empty
    #[error("library path is empty")]
    EmptyLibraryPath,

    /// Component name argument is empty
    #[error("component name is empty")]
    EmptyComponentName,

    /// Library directory does not exist
    #[error("library path '{}' does NOT exist", path.display())]
    LibraryPathMissing { path: PathBuf },

    /// Nothing at the computed artifact path
    #[error("file '{}' does NOT exist", path.display())]
    Missing { path: PathBuf },

    /// Something other than a regular file at the computed path
    #[error("'{}' is not a regular file", path.display())]
    NotRegularFile { path: PathBuf },

    /// Filesystem refused the metadata query
    #[error("unable to inspect '{}': {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// Input-contract violation rather than a filesystem condition
    pub fn is_input_violation(&self) -> bool {
        matches!(self, Self::EmptyLibraryPath | Self::EmptyComponentName)
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, ArtifactError>;
