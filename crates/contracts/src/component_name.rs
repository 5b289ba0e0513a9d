//! ComponentName - logical plugin identifier
//!
//! Uses Arc<str> internally so the name can be shared between the
//! registry, the loader table and diagnostics without reallocating.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Logical name of a pluggable component.
///
/// The name is what the artifact file is called on disk, minus the native
/// extension suffix. Resolver and loader treat it as an opaque string.
///
/// # Examples
/// ```
/// use contracts::ComponentName;
///
/// let name = ComponentName::VIDEO_STREAMER;
/// assert_eq!(ComponentName::from(name).as_str(), "video_streamer");
/// ```
#[derive(Clone, Default)]
pub struct ComponentName(Arc<str>);

impl ComponentName {
    /// Argument parser component
    pub const ARGS_PARSER: &'static str = "command_line_args_parser";
    /// Version reporter component
    pub const VERSION_PRINTER: &'static str = "version_printer";
    /// Video streamer component
    pub const VIDEO_STREAMER: &'static str = "video_streamer";

    /// Create a new ComponentName from a string slice.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three components the launcher requires, in pipeline order.
    pub fn required() -> [ComponentName; 3] {
        [
            Self::new(Self::ARGS_PARSER),
            Self::new(Self::VERSION_PRINTER),
            Self::new(Self::VIDEO_STREAMER),
        ]
    }
}

impl Deref for ComponentName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ComponentName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentName {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ComponentName {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentName({:?})", self.0)
    }
}

impl PartialEq for ComponentName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for ComponentName {}

impl PartialEq<str> for ComponentName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for ComponentName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

// Same as str hash so HashMap<ComponentName, _> can be queried with &str
impl Hash for ComponentName {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl Serialize for ComponentName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ComponentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
