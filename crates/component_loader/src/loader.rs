//! ComponentLoader 核心实现
//!
//! 将已校验的产物绑定到注册表中的工厂，并在本次运行内保留绑定结果。

use std::collections::HashMap;
use std::sync::Arc;

use artifact_resolver::{artifact_path, ArtifactPath, LibraryPath};
use contracts::{
    ArgsParser, ComponentKind, ComponentName, VersionPrinter, VideoStreamer,
    COMPONENT_ABI_VERSION,
};
use tracing::{debug, error, info, instrument};

use crate::binary::check_native_header;
use crate::error::{LoadError, Result};
use crate::registry::{ComponentEntry, ComponentRegistry};

/// A component bound into the process for the rest of the run
#[derive(Debug)]
pub struct BoundComponent {
    name: ComponentName,
    artifact: ArtifactPath,
    entry: ComponentEntry,
}

impl BoundComponent {
    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    pub fn artifact(&self) -> &ArtifactPath {
        &self.artifact
    }

    pub fn kind(&self) -> ComponentKind {
        self.entry.kind()
    }

    /// Construct a new argument parser instance
    pub fn construct_args_parser(&self) -> Result<Box<dyn ArgsParser>> {
        match &self.entry {
            ComponentEntry::ArgsParser(factory) => Ok(factory()),
            other => Err(self.entry_missing(ComponentKind::ArgsParser, other.kind())),
        }
    }

    /// The free-standing version reporter
    pub fn version_printer(&self) -> Result<Arc<dyn VersionPrinter>> {
        match &self.entry {
            ComponentEntry::VersionPrinter(printer) => Ok(Arc::clone(printer)),
            other => Err(self.entry_missing(ComponentKind::VersionPrinter, other.kind())),
        }
    }

    /// Construct a new video streamer instance
    pub fn construct_video_streamer(&self) -> Result<Box<dyn VideoStreamer>> {
        match &self.entry {
            ComponentEntry::VideoStreamer(factory) => Ok(factory()),
            other => Err(self.entry_missing(ComponentKind::VideoStreamer, other.kind())),
        }
    }

    fn entry_missing(&self, expected: ComponentKind, found: ComponentKind) -> LoadError {
        LoadError::EntryMissing {
            name: self.name.to_string(),
            expected,
            found,
        }
    }
}

/// Component Loader
///
/// Owns the registry and the table of components bound during this run.
/// Does not re-verify: callers run the resolver first.
pub struct ComponentLoader {
    registry: ComponentRegistry,
    bound: HashMap<ComponentName, Arc<BoundComponent>>,
}

impl ComponentLoader {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry,
            bound: HashMap::new(),
        }
    }

    /// Bind `name` from `library`.
    ///
    /// # 幂等性
    /// A name that is already bound returns the same component.
    #[instrument(name = "load", skip_all, fields(component = %name))]
    pub fn load(
        &mut self,
        library: &LibraryPath,
        name: &ComponentName,
    ) -> Result<Arc<BoundComponent>> {
        if let Some(bound) = self.bound.get(name.as_str()) {
            debug!("component already bound, reusing");
            return Ok(Arc::clone(bound));
        }

        match self.bind(library, name) {
            Ok(bound) => {
                info!(
                    artifact = %bound.artifact,
                    kind = %bound.kind(),
                    "component bound"
                );
                self.bound.insert(name.clone(), Arc::clone(&bound));
                Ok(bound)
            }
            Err(e) => {
                error!(error = %e, "unable to bind component");
                Err(e)
            }
        }
    }

    fn bind(&self, library: &LibraryPath, name: &ComponentName) -> Result<Arc<BoundComponent>> {
        let artifact = artifact_path(&library.to_string_lossy(), name.as_str());
        check_native_header(artifact.as_path())?;

        let registration = self
            .registry
            .get(name.as_str())
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
            })?;

        if registration.abi_version != COMPONENT_ABI_VERSION {
            return Err(LoadError::AbiMismatch {
                name: name.to_string(),
                expected: COMPONENT_ABI_VERSION,
                found: registration.abi_version,
            });
        }

        Ok(Arc::new(BoundComponent {
            name: name.clone(),
            artifact,
            entry: registration.entry.clone(),
        }))
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bound.contains_key(name)
    }

    /// Names bound so far, sorted
    pub fn bound_names(&self) -> Vec<ComponentName> {
        let mut names: Vec<_> = self.bound.keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::NATIVE_MAGIC;
    use crate::mock::{register_mocks, CallJournal, MockConfig};
    use crate::registry::Registration;
    use artifact_resolver::NATIVE_SUFFIX;

    fn library_with(names: &[&str]) -> (tempfile::TempDir, LibraryPath) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(format!("{name}{NATIVE_SUFFIX}")), NATIVE_MAGIC)
                .unwrap();
        }
        let library = LibraryPath::new_unchecked(dir.path());
        (dir, library)
    }

    fn mock_loader() -> ComponentLoader {
        let mut registry = ComponentRegistry::new();
        register_mocks(&mut registry, MockConfig::default(), CallJournal::default());
        ComponentLoader::new(registry)
    }

    #[test]
    fn test_load_binds_component() {
        let (_dir, library) = library_with(&[ComponentName::ARGS_PARSER]);
        let mut loader = mock_loader();
        let name = ComponentName::new(ComponentName::ARGS_PARSER);

        let bound = loader.load(&library, &name).unwrap();
        assert_eq!(bound.name(), &name);
        assert_eq!(bound.kind(), ComponentKind::ArgsParser);
        assert!(loader.is_bound(ComponentName::ARGS_PARSER));
    }

    #[test]
    fn test_load_twice_returns_same_component() {
        let (_dir, library) = library_with(&[ComponentName::VIDEO_STREAMER]);
        let mut loader = mock_loader();
        let name = ComponentName::new(ComponentName::VIDEO_STREAMER);

        let first = loader.load(&library, &name).unwrap();
        let second = loader.load(&library, &name).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.bound_names().len(), 1);
    }

    #[test]
    fn test_malformed_binary() {
        let (dir, library) = library_with(&[]);
        std::fs::write(
            dir.path().join(format!("{}{NATIVE_SUFFIX}", ComponentName::VERSION_PRINTER)),
            b"garbage",
        )
        .unwrap();
        let mut loader = mock_loader();

        let err = loader
            .load(&library, &ComponentName::new(ComponentName::VERSION_PRINTER))
            .unwrap_err();
        assert!(matches!(err, LoadError::Incompatible { .. }));
        assert!(!loader.is_bound(ComponentName::VERSION_PRINTER));
    }

    #[test]
    fn test_unregistered_component() {
        let (_dir, library) = library_with(&["extra_component"]);
        let mut loader = mock_loader();

        let err = loader
            .load(&library, &ComponentName::new("extra_component"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_abi_mismatch() {
        let (_dir, library) = library_with(&[ComponentName::VERSION_PRINTER]);
        let mut registry = ComponentRegistry::new();
        register_mocks(&mut registry, MockConfig::default(), CallJournal::default());
        let entry = registry
            .get(ComponentName::VERSION_PRINTER)
            .unwrap()
            .entry
            .clone();
        registry.register(
            ComponentName::VERSION_PRINTER,
            Registration {
                abi_version: COMPONENT_ABI_VERSION + 1,
                entry,
            },
        );
        let mut loader = ComponentLoader::new(registry);

        let err = loader
            .load(&library, &ComponentName::new(ComponentName::VERSION_PRINTER))
            .unwrap_err();
        assert!(matches!(err, LoadError::AbiMismatch { .. }));
    }

    #[test]
    fn test_entry_missing() {
        let (_dir, library) = library_with(&[ComponentName::VERSION_PRINTER]);
        let mut loader = mock_loader();

        let bound = loader
            .load(&library, &ComponentName::new(ComponentName::VERSION_PRINTER))
            .unwrap();
        assert!(bound.version_printer().is_ok());

        let err = bound.construct_video_streamer().err().unwrap();
        match err {
            LoadError::EntryMissing {
                expected, found, ..
            } => {
                assert_eq!(expected, ComponentKind::VideoStreamer);
                assert_eq!(found, ComponentKind::VersionPrinter);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
