//! Device type to draw.io shape mapping.

use indexmap::IndexMap;

use crate::config::IconConfig;

/// Shape used for device types without a mapping.
pub const FALLBACK_SHAPE: &str = "mxgraph.rack.general.1u_rack_server";

/// Built-in mappings, applied before any configured ones.
const BUILTIN_SHAPES: [(&str, &str); 2] = [
    ("server", "mxgraph.rack.dell.dell_poweredge_2u"),
    (
        "router",
        "mxgraph.rack.hpe_aruba.switches.jl9826a_5412r_92g_poeplus_4sfp_zl2_switch",
    ),
];

/// Looks up the draw.io shape for a device type.
///
/// # Examples
///
/// ```
/// use rackdraw::icons::{FALLBACK_SHAPE, IconTable};
///
/// let icons = IconTable::default();
/// assert_eq!(icons.shape_for("server"), "mxgraph.rack.dell.dell_poweredge_2u");
/// assert_eq!(icons.shape_for("toaster"), FALLBACK_SHAPE);
/// ```
#[derive(Debug, Clone)]
pub struct IconTable {
    shapes: IndexMap<String, String>,
    fallback: String,
}

impl Default for IconTable {
    fn default() -> Self {
        Self {
            shapes: BUILTIN_SHAPES
                .iter()
                .map(|&(kind, shape)| (kind.to_string(), shape.to_string()))
                .collect(),
            fallback: FALLBACK_SHAPE.to_string(),
        }
    }
}

impl IconTable {
    /// Builds the table from the built-in mappings plus `config`.
    pub fn from_config(config: &IconConfig) -> Self {
        let mut table = Self::default();
        for (kind, shape) in config.shapes() {
            table.insert(kind.clone(), shape.clone());
        }
        if let Some(fallback) = config.fallback() {
            table.fallback = fallback.to_string();
        }
        table
    }

    /// Adds or replaces the shape for `kind`.
    pub fn insert(&mut self, kind: impl Into<String>, shape: impl Into<String>) {
        self.shapes.insert(kind.into(), shape.into());
    }

    /// Returns the shape for `kind`, or the fallback shape.
    pub fn shape_for(&self, kind: &str) -> &str {
        self.shapes.get(kind).unwrap_or(&self.fallback)
    }

    /// Returns `true` if `kind` has its own mapping.
    pub fn contains(&self, kind: &str) -> bool {
        self.shapes.contains_key(kind)
    }
}
