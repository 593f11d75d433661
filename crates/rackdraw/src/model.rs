//! In-memory model of a rack diagram document.
//!
//! The model mirrors the draw.io structure one level above raw XML:
//!
//! - [`Document`] owns the file metadata and an ordered list of pages.
//! - [`Page`] owns the cells drawn on one canvas (one rack per page).
//! - [`Cell`] is a rack container, its centering marker, or a device.
//!
//! Cells carry fully computed geometry and styles; the exporter only maps
//! them onto elements.

use chrono::{DateTime, Utc};

use rackdraw_core::{geometry::Bounds, identifier::CellId, style::Style};

/// Format of the `modified` attribute, UTC with a trailing `Z`.
const MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Metadata written on the `mxfile` root element.
#[derive(Debug, Clone)]
pub struct Metadata {
    host: String,
    modified: DateTime<Utc>,
    agent: String,
    version: String,
}

impl Metadata {
    pub fn new(
        host: impl Into<String>,
        modified: DateTime<Utc>,
        agent: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            modified,
            agent: agent.into(),
            version: version.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns the modification time formatted as `2024-05-01T08:30:00Z`.
    pub fn modified_string(&self) -> String {
        self.modified.format(MODIFIED_FORMAT).to_string()
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn set_modified(&mut self, modified: DateTime<Utc>) {
        self.modified = modified;
    }
}

/// The root of a rack diagram.
#[derive(Debug, Clone)]
pub struct Document {
    metadata: Metadata,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            pages: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Appends a new page numbered after the existing ones and returns its index.
    pub(crate) fn push_page(&mut self) -> usize {
        let index = self.pages.len();
        self.pages.push(Page::new(index + 1));
        index
    }

    pub(crate) fn page_mut(&mut self, index: usize) -> &mut Page {
        &mut self.pages[index]
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// One draw.io canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: String,
    name: String,
    cells: Vec<Cell>,
}

impl Page {
    /// Creates an empty page with the default name for its 1-based `ordinal`.
    pub fn new(ordinal: usize) -> Self {
        Self {
            id: format!("rack-{ordinal}"),
            name: format!("Rack {ordinal}"),
            cells: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn push_cell(&mut self, cell: impl Into<Cell>) {
        self.cells.push(cell.into());
    }
}

/// A drawable cell on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Rack(RackCell),
    Marker(MarkerCell),
    Device(DeviceCell),
}

impl Cell {
    /// Returns the cell identifier
    pub fn id(&self) -> &CellId {
        match self {
            Cell::Rack(rack) => rack.id(),
            Cell::Marker(marker) => marker.id(),
            Cell::Device(device) => device.id(),
        }
    }

    /// Returns the cell geometry, relative to its parent
    pub fn bounds(&self) -> Bounds {
        match self {
            Cell::Rack(rack) => rack.bounds(),
            Cell::Marker(marker) => marker.bounds(),
            Cell::Device(device) => device.bounds(),
        }
    }
}

impl From<RackCell> for Cell {
    fn from(rack: RackCell) -> Self {
        Cell::Rack(rack)
    }
}

impl From<MarkerCell> for Cell {
    fn from(marker: MarkerCell) -> Self {
        Cell::Marker(marker)
    }
}

impl From<DeviceCell> for Cell {
    fn from(device: DeviceCell) -> Self {
        Cell::Device(device)
    }
}

/// A rack cabinet container.
#[derive(Debug, Clone, PartialEq)]
pub struct RackCell {
    id: CellId,
    name: String,
    units: u32,
    bounds: Bounds,
    style: Style,
}

impl RackCell {
    pub fn new(id: CellId, name: impl Into<String>, units: u32, bounds: Bounds, style: Style) -> Self {
        Self {
            id,
            name: name.into(),
            units,
            bounds,
            style,
        }
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capacity in rack units
    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// The invisible marker at a rack's center.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCell {
    id: CellId,
    bounds: Bounds,
    style: Style,
}

impl MarkerCell {
    pub fn new(id: CellId, bounds: Bounds, style: Style) -> Self {
        Self { id, bounds, style }
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// A device placed inside a rack.
///
/// `attributes` holds the metadata written on the device's `object`
/// element after `id` and `label`, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCell {
    id: CellId,
    label: String,
    parent: CellId,
    attributes: Vec<(String, String)>,
    bounds: Bounds,
    style: Style,
}

impl DeviceCell {
    pub fn new(
        id: CellId,
        label: impl Into<String>,
        parent: CellId,
        attributes: Vec<(String, String)>,
        bounds: Bounds,
        style: Style,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            attributes,
            bounds,
            style,
        }
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identifier of the rack containing this device
    pub fn parent(&self) -> &CellId {
        &self.parent
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Geometry relative to the parent rack
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}
