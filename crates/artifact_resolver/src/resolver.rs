//! ArtifactResolver 核心实现
//!
//! 计算组件产物路径并校验文件存在。

use std::io::ErrorKind;

use contracts::ComponentName;
use tracing::{debug, error, instrument};

use crate::error::{ArtifactError, Result};
use crate::path::{artifact_path, ArtifactPath, LibraryPath};

/// Artifact Resolver
///
/// Stateless; never creates, modifies or caches filesystem entries.
pub struct ArtifactResolver;

impl ArtifactResolver {
    /// Tagged check: the verified artifact path, or why there is none.
    ///
    /// Empty arguments are rejected before any filesystem access.
    pub fn check(library_path: &str, component_name: &str) -> Result<ArtifactPath> {
        if library_path.is_empty() {
            return Err(ArtifactError::EmptyLibraryPath);
        }
        if component_name.is_empty() {
            return Err(ArtifactError::EmptyComponentName);
        }

        let path = artifact_path(library_path, component_name);
        match std::fs::metadata(path.as_path()) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(ArtifactError::NotRegularFile {
                path: path.into_path_buf(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ArtifactError::Missing {
                path: path.into_path_buf(),
            }),
            Err(e) => Err(ArtifactError::Inaccessible {
                path: path.into_path_buf(),
                source: e,
            }),
        }
    }

    /// `true` iff a regular file exists at the computed artifact path.
    ///
    /// Every failure collapses to `false`; the emitted diagnostic is the only
    /// thing telling an invalid input apart from a missing file.
    #[instrument(name = "module_exists", skip_all)]
    pub fn verify(library_path: &str, component_name: &str) -> bool {
        match Self::check(library_path, component_name) {
            Ok(path) => {
                debug!(path = %path, "artifact verified");
                true
            }
            Err(e) => {
                error!(input_violation = e.is_input_violation(), "{e}");
                false
            }
        }
    }

    /// `verify` against an already resolved library directory
    pub fn verify_component(library: &LibraryPath, name: &ComponentName) -> bool {
        Self::verify(&library.to_string_lossy(), name.as_str())
    }
}
