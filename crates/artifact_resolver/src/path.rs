//! Library and artifact paths

use std::borrow::Cow;
use std::fmt;
use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{ArtifactError, Result};

/// Native shared-library suffix for the host platform (`.so`, `.dylib`, `.dll`)
pub const NATIVE_SUFFIX: &str = std::env::consts::DLL_SUFFIX;

/// Default name of the library directory under the working directory
pub const DEFAULT_LIBRARY_DIR: &str = "libraries";

/// Directory holding every component artifact.
///
/// Resolved once at process start, immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPath(PathBuf);

impl LibraryPath {
    /// `<working_dir>/<dir_name>`, which must be an existing directory.
    pub fn resolve(working_dir: &Path, dir_name: &str) -> Result<Self> {
        let path = working_dir.join(dir_name);
        if !path.is_dir() {
            return Err(ArtifactError::LibraryPathMissing { path });
        }
        Ok(Self(path))
    }

    /// Wrap a path without checking it
    pub fn new_unchecked(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Path as text, for string-level artifact path construction
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }
}

impl fmt::Display for LibraryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Computed on-disk location of a component artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactPath(PathBuf);

impl ArtifactPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ArtifactPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Build the artifact path for `component_name` under `library_path`.
///
/// The suffix is appended unless the name already ends with it. A single
/// separator is inserted unless `library_path` already ends with one.
/// Callers are expected to have rejected empty arguments.
pub fn artifact_path(library_path: &str, component_name: &str) -> ArtifactPath {
    let mut full = String::with_capacity(
        library_path.len() + 1 + component_name.len() + NATIVE_SUFFIX.len(),
    );
    full.push_str(library_path);
    if !library_path.ends_with(is_separator) {
        full.push(MAIN_SEPARATOR);
    }
    full.push_str(component_name);
    if !component_name.ends_with(NATIVE_SUFFIX) {
        full.push_str(NATIVE_SUFFIX);
    }
    ArtifactPath(PathBuf::from(full))
}
