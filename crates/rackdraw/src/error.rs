//! Error types for Rackdraw operations.
//!
//! This module provides the main error type [`RackError`] which covers every
//! failure the builder, the inventory loader and the configuration checks
//! can report.

use std::{fmt, io, ops::Range};

use thiserror::Error;

/// The main error type for Rackdraw operations.
///
/// # Diagnostic Variants
///
/// [`RackError::MalformedAttribute`] and [`RackError::Inventory`] keep the
/// source text they were produced from together with the byte span of the
/// problem, so callers can point at the offending input.
#[derive(Debug, Error)]
pub enum RackError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed device attribute `{pair}`: {issue}")]
    MalformedAttribute {
        src: String,
        span: Range<usize>,
        pair: String,
        issue: AttributeIssue,
    },

    #[error("rack `{rack}` must have at least one unit")]
    InvalidUnitCount { rack: String },

    #[error("invalid inventory: {message}")]
    Inventory {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RackError {
    /// Create a new `MalformedAttribute` error for `span` within `src`.
    ///
    /// `span` must lie on character boundaries of `src`.
    pub fn new_malformed_attribute(src: &str, span: Range<usize>, issue: AttributeIssue) -> Self {
        Self::MalformedAttribute {
            pair: src[span.clone()].to_string(),
            src: src.to_string(),
            span,
            issue,
        }
    }

    /// Create a new `Inventory` error from a TOML deserialization failure.
    pub fn new_inventory_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Inventory {
            message: err.message().to_string(),
            src: src.into(),
            span: err.span(),
        }
    }
}

/// The reason a device attribute pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeIssue {
    /// The pair has no `:` between key and value.
    MissingSeparator,
    /// The pair has more than one `:`.
    ExtraSeparator,
    /// The key is empty after trimming.
    EmptyName,
    /// The key is not a valid XML attribute name.
    InvalidName,
    /// The key would overwrite an attribute the builder manages.
    ReservedName,
}

impl AttributeIssue {
    /// A short hint on how to fix the pair.
    pub fn help(self) -> &'static str {
        match self {
            Self::MissingSeparator | Self::ExtraSeparator => {
                "write each attribute as `key:value` and separate attributes with `|`"
            }
            Self::EmptyName | Self::InvalidName => {
                "attribute names must start with a letter or `_` and contain no spaces"
            }
            Self::ReservedName => "`id` and `label` are set from the device itself",
        }
    }
}

impl fmt::Display for AttributeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingSeparator => "expected exactly one `:` separator, found none",
            Self::ExtraSeparator => "expected exactly one `:` separator, found several",
            Self::EmptyName => "attribute name is empty",
            Self::InvalidName => "attribute name is not a valid XML name",
            Self::ReservedName => "attribute name is reserved",
        };
        f.write_str(text)
    }
}
