//! Hierarchical content names.
//!
//! An NDN name is an ordered sequence of opaque binary components. Names
//! identify the content a request targets, and responders sometimes encode
//! auxiliary fields into trailing components (a numeric identifier, a
//! sentinel marker). Names are built once and treated as immutable after
//! being handed to an [`Interest`](crate::packet::Interest).
//!
//! # Example
//!
//! ```
//! use ndn_sensor_client::name::Name;
//!
//! let name = Name::parse("/esp/sensor/7").append_str("data");
//! assert_eq!(name.len(), 4);
//! assert_eq!(name.to_uri(), "/esp/sensor/7/data");
//! assert_eq!(name.get(-1).unwrap().as_str(), Some("data"));
//! ```

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

/// One segment of a hierarchical content name, stored as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(Bytes);

impl Component {
    /// Create a component from raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Create a component holding the decimal text of `value`.
    ///
    /// Used for timestamps and numeric identifiers, which the protocol
    /// carries as text rather than packed integers.
    pub fn from_number(value: i64) -> Self {
        Self(Bytes::from(value.to_string().into_bytes()))
    }

    /// The raw component bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The component interpreted as UTF-8 text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// The component's text parsed as a decimal integer.
    ///
    /// Returns `None` when the component is not UTF-8 or not a number.
    pub fn as_number(&self) -> Option<i64> {
        self.as_str()?.parse().ok()
    }

    /// Percent-escaped rendering for display in a URI.
    ///
    /// Unreserved URI characters pass through; everything else becomes
    /// `%XX`.
    pub fn to_escaped_string(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for &byte in self.0.iter() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                out.push(byte as char);
            } else {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
        out
    }
}

impl From<&str> for Component {
    fn from(s: &str) -> Self {
        Self(Bytes::copy_from_slice(s.as_bytes()))
    }
}

/// A hierarchical content name: an ordered sequence of [`Component`]s.
///
/// Equality and prefix matching are component-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    components: Vec<Component>,
}

impl Name {
    /// Create an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a slash-delimited URI such as `/esp/sensor/7`.
    ///
    /// Empty segments (leading slash, doubled slashes) are dropped.
    /// Segments are taken literally as UTF-8 bytes.
    pub fn parse(uri: &str) -> Self {
        Self {
            components: uri
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(Component::from)
                .collect(),
        }
    }

    /// Append a component.
    pub fn append(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Append a text component.
    pub fn append_str(self, segment: &str) -> Self {
        self.append(Component::from(segment))
    }

    /// Append a decimal-text numeric component.
    pub fn append_number(self, value: i64) -> Self {
        self.append(Component::from_number(value))
    }

    /// Append the current wall-clock time in milliseconds as a component.
    ///
    /// Request names carry a timestamp so that repeated requests are never
    /// answered from an in-network content store.
    pub fn append_timestamp(self) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.append_number(millis)
    }

    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the name has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get a component by index. Negative indices count from the tail:
    /// `get(-1)` is the last component, `get(-2)` the second-to-last.
    pub fn get(&self, index: isize) -> Option<&Component> {
        let idx = if index < 0 {
            self.components.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.components.get(idx)
    }

    /// Component-wise prefix test.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.components.len() <= other.components.len()
            && self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|(a, b)| a == b)
    }

    /// Render the name as a slash-delimited URI with escaped components.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for component in &self.components {
            out.push('/');
            out.push_str(&component.to_escaped_string());
        }
        out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
