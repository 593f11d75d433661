//! draw.io `mxfile` output.
//!
//! Maps a [`Document`] onto the element tree draw.io expects:
//!
//! ```text
//! mxfile(host, modified, agent, version)
//! └─ diagram(name, id)                      one per page
//!    └─ mxGraphModel(grid, page size, ...)
//!       └─ root
//!          ├─ mxCell id=0                   layer anchors
//!          ├─ mxCell id=1 parent=0
//!          ├─ mxCell (rack)  ─ mxGeometry
//!          ├─ mxCell (marker) ─ mxGeometry
//!          └─ object (device) ─ mxCell ─ mxGeometry
//! ```
//!
//! A document without pages is written with one empty default page, so the
//! output always opens in draw.io.

use std::io;

use log::debug;

use rackdraw_core::{
    geometry::{Bounds, Size},
    xml::{self, Element},
};

use crate::{
    export::Exporter,
    model::{Cell, DeviceCell, Document, MarkerCell, Page, RackCell},
};

/// Identifier of the root layer anchor.
const ROOT_CELL_ID: &str = "0";
/// Identifier of the default layer, parent of every rack and marker.
const LAYER_CELL_ID: &str = "1";

/// Writes documents as draw.io XML to any [`io::Write`].
#[derive(Debug)]
pub struct DrawioExporter<W: io::Write> {
    writer: W,
    page_size: Size,
}

impl<W: io::Write> DrawioExporter<W> {
    /// Creates an exporter writing pages of `page_size` to `writer`.
    pub fn new(writer: W, page_size: Size) -> Self {
        Self { writer, page_size }
    }

    /// Consumes the exporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Exporter for DrawioExporter<W> {
    fn export_document(&mut self, document: &Document) -> io::Result<()> {
        let root = to_element(document, self.page_size);
        debug!(pages = document.pages().len(); "draw.io document rendered");
        xml::write_document(&mut self.writer, &root)
    }
}

/// Builds the `mxfile` element tree for `document`.
pub fn to_element(document: &Document, page_size: Size) -> Element {
    let metadata = document.metadata();
    let mut mxfile = Element::new("mxfile")
        .with_attr("host", metadata.host())
        .with_attr("modified", metadata.modified_string())
        .with_attr("agent", metadata.agent())
        .with_attr("version", metadata.version());

    if document.pages().is_empty() {
        mxfile.push_child(page_element(&Page::new(1), page_size));
    } else {
        for page in document.pages() {
            mxfile.push_child(page_element(page, page_size));
        }
    }

    mxfile
}

fn page_element(page: &Page, page_size: Size) -> Element {
    let mut root = Element::new("root")
        .with_child(Element::new("mxCell").with_attr("id", ROOT_CELL_ID))
        .with_child(
            Element::new("mxCell")
                .with_attr("id", LAYER_CELL_ID)
                .with_attr("parent", ROOT_CELL_ID),
        );

    for cell in page.cells() {
        root.push_child(match cell {
            Cell::Rack(rack) => rack_element(rack),
            Cell::Marker(marker) => marker_element(marker),
            Cell::Device(device) => device_element(device),
        });
    }

    let model = Element::new("mxGraphModel")
        .with_attr("dx", 1100)
        .with_attr("dy", 810)
        .with_attr("grid", 1)
        .with_attr("gridSize", 5)
        .with_attr("guides", 1)
        .with_attr("tooltips", 1)
        .with_attr("connect", 1)
        .with_attr("arrows", 1)
        .with_attr("fold", 1)
        .with_attr("page", 1)
        .with_attr("pageScale", 1)
        .with_attr("pageWidth", page_size.width())
        .with_attr("pageHeight", page_size.height())
        .with_attr("math", 0)
        .with_attr("shadow", 0)
        .with_child(root);

    Element::new("diagram")
        .with_attr("name", page.name())
        .with_attr("id", page.id())
        .with_child(model)
}

fn rack_element(rack: &RackCell) -> Element {
    Element::new("mxCell")
        .with_attr("id", rack.id())
        .with_attr("value", rack.name())
        .with_attr("style", rack.style())
        .with_attr("vertex", 1)
        .with_attr("parent", LAYER_CELL_ID)
        .with_child(geometry_element(rack.bounds()))
}

fn marker_element(marker: &MarkerCell) -> Element {
    Element::new("mxCell")
        .with_attr("id", marker.id())
        .with_attr("style", marker.style())
        .with_attr("vertex", 1)
        .with_attr("parent", LAYER_CELL_ID)
        .with_child(geometry_element(marker.bounds()))
}

fn device_element(device: &DeviceCell) -> Element {
    let mut object = Element::new("object")
        .with_attr("id", device.id())
        .with_attr("label", device.label());
    for (key, value) in device.attributes() {
        object.set_attr(key.as_str(), value);
    }

    let cell = Element::new("mxCell")
        .with_attr("style", device.style())
        .with_attr("vertex", 1)
        .with_attr("parent", device.parent())
        .with_child(geometry_element(device.bounds()));

    object.with_child(cell)
}

fn geometry_element(bounds: Bounds) -> Element {
    Element::new("mxGeometry")
        .with_attr("x", bounds.x())
        .with_attr("y", bounds.y())
        .with_attr("width", bounds.width())
        .with_attr("height", bounds.height())
        .with_attr("as", "geometry")
}
