//! # Artifact Resolver
//!
//! Resolves and validates a component's on-disk artifact before it is loaded.
//!
//! Responsibilities:
//! - Resolve the library directory under the working directory
//! - Compute `<library>/<component><suffix>` with exactly one separator
//! - Verify a regular file exists there
//!
//! # Example
//!
//! ```no_run
//! use artifact_resolver::ArtifactResolver;
//!
//! if !ArtifactResolver::verify("/app/libraries", "video_streamer") {
//!     return;
//! }
//! ```

mod error;
mod path;
mod resolver;

pub use error::{ArtifactError, Result};
pub use path::{artifact_path, ArtifactPath, LibraryPath, DEFAULT_LIBRARY_DIR, NATIVE_SUFFIX};
pub use resolver::ArtifactResolver;

/// Crate version, reported by the version printer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
