//! draw.io cell style strings.
//!
//! draw.io encodes the visual properties of a cell in a single `style`
//! attribute made of `key=value;` entries:
//!
//! ```text
//! strokeColor=#666666;html=1;shape=mxgraph.rackGeneral.rackCabinet3;fontSize=32;
//! ```
//!
//! [`Style`] keeps the entries in insertion order and renders them with a
//! trailing `;` after every entry, which is the form draw.io itself writes.

use std::fmt;

use indexmap::IndexMap;

/// An ordered set of draw.io style entries.
///
/// Setting a key that already exists replaces its value in place.
///
/// # Examples
///
/// ```
/// use rackdraw_core::style::Style;
///
/// let style = Style::new()
///     .with("shape", "ellipse")
///     .with("opacity", 0)
///     .with("shape", "rect");
///
/// assert_eq!(style.to_string(), "shape=rect;opacity=0;");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: IndexMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.entries.insert(key.into(), value.to_string());
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            write!(f, "{key}={value};")?;
        }
        Ok(())
    }
}
