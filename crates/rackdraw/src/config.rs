//! Configuration types for Rackdraw diagram generation.
//!
//! This module provides configuration structures that control the geometry,
//! the document metadata, the device metadata attribute names, and the icon
//! table. All types implement [`serde::Deserialize`] so they can be loaded
//! from a TOML file; every field is optional and falls back to the defaults
//! used by draw.io's rack shape library.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Page size, rack margins, unit height and rack width.
//! - [`DocumentConfig`] - `mxfile` metadata and identifier scheme.
//! - [`AttributeConfig`] - Attribute names used for IP, purpose and status.
//! - [`IconConfig`] - Device type to draw.io shape mapping.
//!
//! # Example
//!
//! ```
//! # use rackdraw::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     scale = 1.0
//!
//!     [attributes]
//!     purpose = "用途"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().unit_height(), 15.0);
//! assert_eq!(config.attributes().purpose(), "用途");
//! assert!(config.validate().is_ok());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use rackdraw_core::identifier::IdScheme;

use crate::{RackError, attributes};

/// Top-level configuration for a [`RackDiagramBuilder`](crate::RackDiagramBuilder).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Geometry configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Document metadata section.
    #[serde(default)]
    document: DocumentConfig,

    /// Device metadata attribute names.
    #[serde(default)]
    attributes: AttributeConfig,

    /// Device icon mapping.
    #[serde(default)]
    icons: IconConfig,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the document configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    /// Returns the attribute name configuration.
    pub fn attributes(&self) -> &AttributeConfig {
        &self.attributes
    }

    /// Returns the icon configuration.
    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    /// Checks values that deserialization alone cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Config`] if a geometric value is not a positive
    /// finite number, or if a configured attribute name is empty, reserved
    /// (`id`, `label`) or not a valid XML attribute name.
    pub fn validate(&self) -> Result<(), RackError> {
        self.layout.validate()?;
        self.attributes.validate()
    }
}

/// Geometry of pages, racks and devices, in draw.io pixels.
///
/// `unit_height` and `rack_width` are nominal values; the builder multiplies
/// both by `scale` to obtain the rendered sizes (`15 × 1.3 = 19.5` and
/// `204 × 1.3 = 265.2` by default).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    page_width: f64,
    page_height: f64,
    margin_top: f64,
    margin_bottom: f64,
    margin_left: f64,
    margin_right: f64,
    scale: f64,
    unit_height: f64,
    rack_width: f64,
    device_x: f64,
    device_inset: f64,
    rack_font_size: u32,
    device_font_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 827.0,
            page_height: 1169.0,
            margin_top: 21.0,
            margin_bottom: 22.0,
            margin_left: 33.0,
            margin_right: 9.0,
            scale: 1.3,
            unit_height: 15.0,
            rack_width: 204.0,
            device_x: 33.0,
            device_inset: 42.0,
            rack_font_size: 32,
            device_font_size: 20,
        }
    }
}

impl LayoutConfig {
    /// Page width shared by every page.
    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Page height shared by every page.
    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Space between the top of the rack shape and its first unit.
    pub fn margin_top(&self) -> f64 {
        self.margin_top
    }

    /// Space between the last unit and the bottom of the rack shape.
    pub fn margin_bottom(&self) -> f64 {
        self.margin_bottom
    }

    pub fn margin_left(&self) -> f64 {
        self.margin_left
    }

    pub fn margin_right(&self) -> f64 {
        self.margin_right
    }

    /// Rendered height of one rack unit.
    pub fn unit_height(&self) -> f64 {
        self.unit_height * self.scale
    }

    /// Rendered width of every rack.
    pub fn rack_width(&self) -> f64 {
        self.rack_width * self.scale
    }

    /// Horizontal offset of devices inside their rack.
    pub fn device_x(&self) -> f64 {
        self.device_x
    }

    /// Amount subtracted from the rack width to obtain the device width.
    pub fn device_inset(&self) -> f64 {
        self.device_inset
    }

    pub fn rack_font_size(&self) -> u32 {
        self.rack_font_size
    }

    pub fn device_font_size(&self) -> u32 {
        self.device_font_size
    }

    fn validate(&self) -> Result<(), RackError> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("scale", self.scale),
            ("unit_height", self.unit_height),
            ("rack_width", self.rack_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RackError::Config(format!(
                    "layout.{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("device_x", self.device_x),
            ("device_inset", self.device_inset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RackError::Config(format!(
                    "layout.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Metadata written on the `mxfile` root element.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    host: String,
    agent: String,
    version: String,
    id_scheme: IdScheme,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            host: "rackdraw".to_string(),
            agent: concat!("rackdraw/", env!("CARGO_PKG_VERSION")).to_string(),
            version: "26.0.9".to_string(),
            id_scheme: IdScheme::default(),
        }
    }
}

impl DocumentConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// draw.io format version advertised in the file.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Strategy used to generate cell identifiers.
    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }
}

/// Names of the optional device metadata attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeConfig {
    ip: String,
    purpose: String,
    status: String,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            ip: "IP".to_string(),
            purpose: "purpose".to_string(),
            status: "status".to_string(),
        }
    }
}

impl AttributeConfig {
    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn validate(&self) -> Result<(), RackError> {
        for (field, name) in [
            ("ip", &self.ip),
            ("purpose", &self.purpose),
            ("status", &self.status),
        ] {
            attributes::check_name(name).map_err(|issue| {
                RackError::Config(format!("attributes.{field} `{name}`: {issue}"))
            })?;
        }
        Ok(())
    }
}

/// Device type to draw.io shape mapping.
///
/// Entries in `shapes` are added on top of the built-in `server` and
/// `router` mappings and replace them when the type matches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    fallback: Option<String>,
    shapes: IndexMap<String, String>,
}

impl IconConfig {
    /// Shape used for device types without a mapping, if overridden.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Additional device type to shape mappings.
    pub fn shapes(&self) -> &IndexMap<String, String> {
        &self.shapes
    }
}
