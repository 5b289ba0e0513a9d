//! # Component Loader
//!
//! Binds verified component artifacts into the running process.
//!
//! Responsibilities:
//! - Hold the plugin registry (component name -> factory)
//! - Check an artifact is a native library for this platform before binding
//! - Enforce the collaborator ABI revision
//! - Keep bound components for the rest of the run (idempotent loads)
//! - Provide mock components with injectable failures for tests

pub mod binary;
pub mod error;
pub mod loader;
pub mod mock;
pub mod registry;

pub use contracts::{ComponentKind, ComponentName};
pub use error::{LoadError, Result};
pub use loader::{BoundComponent, ComponentLoader};
pub use mock::{CallJournal, MockBehavior, MockConfig};
pub use registry::{ComponentEntry, ComponentRegistry, Registration};

/// Crate version, reported by the version printer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
