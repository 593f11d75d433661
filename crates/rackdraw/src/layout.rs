//! Rack and device geometry.
//!
//! [`RackLayout`] turns the configured constants into pixel geometry and
//! draw.io styles:
//!
//! ```text
//!  page ┌──────────────────────────┐
//!       │      rack (centered)     │
//!       │   ┌──────────────────┐   │
//!       │   │ margin_top       │   │
//!       │ 42│ ████ device ████ │   │  y = margin_top + (C - floor - h + 1) × unit
//!       │ ..│                  │   │
//!       │  1│                  │   │
//!       │   │ margin_bottom    │   │
//!       │   └──────────────────┘   │
//!       └──────────────────────────┘
//! ```
//!
//! Units are numbered from the bottom of the rack, so unit 1 is the lowest
//! slot and unit `C` (the rack capacity) the highest. Device coordinates are
//! relative to the rack, which is their parent cell.

use rackdraw_core::{
    geometry::{Bounds, Point, Size},
    style::Style,
};

use crate::config::LayoutConfig;

/// Default rack capacity in units.
pub const DEFAULT_RACK_UNITS: u32 = 42;

/// Size of the invisible marker placed at the rack center.
const MARKER_SIZE: f64 = 2.0;

/// Computes rack and device geometry from a [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct RackLayout {
    config: LayoutConfig,
}

impl RackLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the layout constants
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Rendered height of one rack unit
    pub fn unit_height(&self) -> f64 {
        self.config.unit_height()
    }

    /// Rendered width of every rack
    pub fn rack_width(&self) -> f64 {
        self.config.rack_width()
    }

    /// Page size shared by all pages
    pub fn page_size(&self) -> Size {
        Size::new(self.config.page_width(), self.config.page_height())
    }

    /// Pixel height of a rack holding `units` units, margins included.
    pub fn rack_height(&self, units: u32) -> f64 {
        self.unit_height() * f64::from(units) + self.config.margin_top() + self.config.margin_bottom()
    }

    /// Bounds of a rack with `units` units, centered on the page.
    pub fn rack_bounds(&self, units: u32) -> Bounds {
        let size = Size::new(self.rack_width(), self.rack_height(units));
        Bounds::centered_in(self.page_size(), size)
    }

    /// Bounds of the centering marker for a rack placed at `rack`.
    pub fn marker_bounds(&self, rack: &Bounds) -> Bounds {
        Bounds::new_from_center(rack.center(), Size::new(MARKER_SIZE, MARKER_SIZE))
    }

    /// Bounds of a device relative to its rack.
    ///
    /// `floor` is the lowest unit the device occupies and `height` the number
    /// of units it spans. Placement is not checked against the rack capacity:
    /// a device that does not fit ends up above or below the rack.
    pub fn device_bounds(&self, rack_units: u32, floor: i32, height: u32) -> Bounds {
        let slots_above =
            i64::from(rack_units) - i64::from(floor) - i64::from(height) + 1;
        let y = self.config.margin_top() + slots_above as f64 * self.unit_height();

        let size = Size::new(
            self.rack_width() - self.config.device_inset(),
            f64::from(height) * self.unit_height(),
        );
        Bounds::new_from_top_left(Point::new(self.config.device_x(), y), size)
    }

    /// Style of the rack cabinet container.
    pub fn rack_style(&self) -> Style {
        Style::new()
            .with("strokeColor", "#666666")
            .with("html", 1)
            .with("verticalLabelPosition", "bottom")
            .with("labelBackgroundColor", "#ffffff")
            .with("verticalAlign", "top")
            .with("outlineConnect", 0)
            .with("shadow", 0)
            .with("dashed", 0)
            .with("shape", "mxgraph.rackGeneral.rackCabinet3")
            .with("fillColor2", "#f4f4f4")
            .with("container", 1)
            .with("collapsible", 0)
            .with("childLayout", "rack")
            .with("allowGaps", 1)
            .with("marginLeft", self.config.margin_left())
            .with("marginRight", self.config.margin_right())
            .with("marginTop", self.config.margin_top())
            .with("marginBottom", self.config.margin_bottom())
            .with("textColor", "#666666")
            .with("numDisp", "descend")
            .with("rackUnitSize", self.unit_height())
            .with("fontSize", self.config.rack_font_size())
    }

    /// Style of the zero-opacity centering marker.
    pub fn marker_style(&self) -> Style {
        Style::new()
            .with("shape", "ellipse")
            .with("fillColor", "#ff0000")
            .with("strokeColor", "#ff0000")
            .with("opacity", 0)
    }

    /// Style of a device drawn with the draw.io `shape`.
    pub fn device_style(&self, shape: &str) -> Style {
        Style::new()
            .with("strokeColor", "#666666")
            .with("html", 1)
            .with("labelPosition", "right")
            .with("align", "left")
            .with("spacingLeft", 15)
            .with("shadow", 0)
            .with("dashed", 0)
            .with("outlineConnect", 0)
            .with("shape", shape)
            .with("fontSize", self.config.device_font_size())
    }
}

impl Default for RackLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
