//! Plugin registry: component name -> factory
//!
//! Populated once at process start. The loader binds an artifact to the
//! factory registered under the same name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use contracts::{
    ArgsParser, ComponentKind, ComponentName, VersionPrinter, VideoStreamer,
    COMPONENT_ABI_VERSION,
};

/// Builds a fresh argument parser
pub type ArgsParserFactory = Arc<dyn Fn() -> Box<dyn ArgsParser> + Send + Sync>;

/// Builds a fresh video streamer
pub type VideoStreamerFactory = Arc<dyn Fn() -> Box<dyn VideoStreamer> + Send + Sync>;

/// Top-level entry a component exposes
#[derive(Clone)]
pub enum ComponentEntry {
    ArgsParser(ArgsParserFactory),
    VersionPrinter(Arc<dyn VersionPrinter>),
    VideoStreamer(VideoStreamerFactory),
}

impl ComponentEntry {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ArgsParser(_) => ComponentKind::ArgsParser,
            Self::VersionPrinter(_) => ComponentKind::VersionPrinter,
            Self::VideoStreamer(_) => ComponentKind::VideoStreamer,
        }
    }
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentEntry").field(&self.kind()).finish()
    }
}

/// Registered factory plus the ABI revision it was built against
#[derive(Debug, Clone)]
pub struct Registration {
    pub abi_version: u32,
    pub entry: ComponentEntry,
}

impl Registration {
    /// Registration against the current ABI
    pub fn current(entry: ComponentEntry) -> Self {
        Self {
            abi_version: COMPONENT_ABI_VERSION,
            entry,
        }
    }
}

/// Component registry
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    entries: HashMap<ComponentName, Registration>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a component; returns the replaced registration
    pub fn register(
        &mut self,
        name: impl Into<ComponentName>,
        registration: Registration,
    ) -> Option<Registration> {
        self.entries.insert(name.into(), registration)
    }

    pub fn register_args_parser<F>(&mut self, name: impl Into<ComponentName>, factory: F)
    where
        F: Fn() -> Box<dyn ArgsParser> + Send + Sync + 'static,
    {
        self.register(
            name,
            Registration::current(ComponentEntry::ArgsParser(Arc::new(factory))),
        );
    }

    pub fn register_version_printer<P>(&mut self, name: impl Into<ComponentName>, printer: P)
    where
        P: VersionPrinter + 'static,
    {
        self.register(
            name,
            Registration::current(ComponentEntry::VersionPrinter(Arc::new(printer))),
        );
    }

    pub fn register_video_streamer<F>(&mut self, name: impl Into<ComponentName>, factory: F)
    where
        F: Fn() -> Box<dyn VideoStreamer> + Send + Sync + 'static,
    {
        self.register(
            name,
            Registration::current(ComponentEntry::VideoStreamer(Arc::new(factory))),
        );
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<ComponentName> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
