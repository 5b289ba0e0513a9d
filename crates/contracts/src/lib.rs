//! # Contracts
//!
//! Frozen interface contracts shared by every launcher crate: component
//! names, the collaborator traits components implement, stage descriptors,
//! run state and the streamer settings file schema.
//! All business crates depend on this crate, reverse dependencies are prohibited.

mod collaborator;
mod component_name;
mod error;
mod runtime;
mod settings;
mod stage;

pub use collaborator::*;
pub use component_name::ComponentName;
pub use error::*;
pub use runtime::*;
pub use settings::*;
pub use stage::*;

/// Crate version, reported by the version printer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
