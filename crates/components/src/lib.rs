//! # Components
//!
//! Default in-process implementations of the three collaborators and their
//! registration in the plugin registry.

mod args_parser;
mod version_printer;
mod video_streamer;

pub use args_parser::CommandLineArgsParser;
pub use version_printer::{LibraryVersion, LibraryVersionPrinter};
pub use video_streamer::{DryRunVideoStreamer, StreamSession};

use component_loader::ComponentRegistry;
use contracts::ComponentName;

/// Crate version, reported by the version printer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Register the default collaborators under the launcher's component names
pub fn register_builtin(registry: &mut ComponentRegistry) {
    registry.register_args_parser(ComponentName::ARGS_PARSER, || {
        Box::new(CommandLineArgsParser::new())
    });
    registry.register_version_printer(ComponentName::VERSION_PRINTER, LibraryVersionPrinter);
    registry.register_video_streamer(ComponentName::VIDEO_STREAMER, || {
        Box::new(DryRunVideoStreamer::new())
    });
}

/// A registry holding only the default collaborators
pub fn builtin_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_builtin(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ComponentKind;

    #[test]
    fn test_builtin_registry_covers_required_components() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 3);
        for name in ComponentName::required() {
            assert!(registry.contains(name.as_str()), "missing {name}");
        }
        assert_eq!(
            registry.get(ComponentName::VIDEO_STREAMER).unwrap().entry.kind(),
            ComponentKind::VideoStreamer
        );
    }
}
