//! Export functionality for rack diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`Document`] out. It is the final stage of the builder:
//!
//! ```text
//! create_rack / create_device
//!     ↓
//! Document (pages, cells, geometry, styles)
//!     ↓ export (this module)
//! .drawio file
//! ```
//!
//! # Available Backends
//!
//! - [`drawio`]: draw.io `mxfile` XML via [`drawio::DrawioExporter`]

/// draw.io export backend.
pub mod drawio;

use std::io;

use crate::model::Document;

/// Abstraction for document export backends.
pub trait Exporter {
    /// Exports a document to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing the output fails.
    fn export_document(&mut self, document: &Document) -> io::Result<()>;
}
