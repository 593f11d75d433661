//! Rackdraw - draw.io diagrams of server racks.
//!
//! Rackdraw builds `.drawio` files with one page per rack. Each rack is a
//! draw.io rack cabinet sized to its unit capacity, and devices are placed in
//! it by their lowest unit and height, carrying their metadata as attributes
//! that draw.io shows in its "Edit Data" dialog.
//!
//! # Example
//!
//! ```rust,no_run
//! use rackdraw::{DeviceSpec, RackDiagramBuilder};
//!
//! let mut builder = RackDiagramBuilder::default();
//! builder.create_rack("R1", 42)?;
//! builder.create_device(
//!     &DeviceSpec::new("srv1", "server", "R1", 1, 2)
//!         .with_ip("10.0.0.10")
//!         .with_other_data("owner:web|serial:CN-0X1234"),
//! )?;
//! builder.save_to_file("racks.drawio")?;
//! # Ok::<(), rackdraw::RackError>(())
//! ```

pub mod attributes;
pub mod config;
pub mod export;
pub mod icons;
pub mod inventory;
pub mod layout;
pub mod model;

mod device;
mod error;

pub use rackdraw_core::{geometry, identifier, style, xml};

pub use device::DeviceSpec;
pub use error::{AttributeIssue, RackError};

use std::{
    collections::HashMap,
    fs::File,
    io::BufWriter,
    path::Path,
};

use chrono::{DateTime, Utc};
use log::{debug, info, trace, warn};

use config::AppConfig;
use export::{Exporter, drawio::DrawioExporter};
use icons::IconTable;
use identifier::{CellId, IdGenerator};
use layout::{DEFAULT_RACK_UNITS, RackLayout};
use model::{DeviceCell, Document, MarkerCell, Metadata, RackCell};

/// Identifier prefix of rack cells.
const RACK_ID_PREFIX: &str = "rack";
/// Identifier prefix of centering marker cells.
const MARKER_ID_PREFIX: &str = "view_center";

/// The index entry for a named rack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackEntry {
    id: CellId,
    units: u32,
    page: usize,
}

impl RackEntry {
    /// Identifier of the rack cell
    pub fn id(&self) -> &CellId {
        &self.id
    }

    /// Capacity in units
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Index of the page holding the rack
    pub fn page(&self) -> usize {
        self.page
    }
}

/// Builder for draw.io rack diagrams.
///
/// The builder owns the document being built and an index from rack name to
/// the rack's identifier and capacity. Every mutation takes `&mut self`, so a
/// builder has a single owner for its whole lifetime.
///
/// Pages are created on demand: each [`create_rack`](Self::create_rack) call
/// adds one page. A builder with no racks is written with a single empty
/// default page.
///
/// # Examples
///
/// ```
/// use rackdraw::{DeviceSpec, RackDiagramBuilder};
///
/// let mut builder = RackDiagramBuilder::default();
///
/// // Racks are created on demand when a device refers to them.
/// builder
///     .create_device(&DeviceSpec::new("srv1", "server", "R1", 1, 2))
///     .expect("Failed to place device");
///
/// let rack = builder.rack("R1").expect("Rack should be indexed");
/// assert_eq!(rack.units(), 42);
/// assert!(builder.render_to_string().contains("srv1"));
/// ```
#[derive(Debug)]
pub struct RackDiagramBuilder {
    config: AppConfig,
    layout: RackLayout,
    icons: IconTable,
    ids: IdGenerator,
    racks: HashMap<String, RackEntry>,
    document: Document,
}

impl Default for RackDiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl RackDiagramBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// The configuration is used as given: call [`AppConfig::validate`]
    /// first, or use [`try_new`](Self::try_new), when it comes from user
    /// input. The document's `modified` timestamp is taken from the current
    /// time; use [`with_modified`](Self::with_modified) to pin it.
    pub fn new(config: AppConfig) -> Self {
        let document_config = config.document();
        let metadata = Metadata::new(
            document_config.host(),
            Utc::now(),
            document_config.agent(),
            document_config.version(),
        );

        debug!(
            id_scheme:? = document_config.id_scheme(),
            unit_height = config.layout().unit_height(),
            rack_width = config.layout().rack_width();
            "Creating rack diagram builder"
        );

        Self {
            layout: RackLayout::new(config.layout().clone()),
            icons: IconTable::from_config(config.icons()),
            ids: IdGenerator::new(document_config.id_scheme()),
            racks: HashMap::new(),
            document: Document::new(metadata),
            config,
        }
    }

    /// Create a new builder after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Config`] if [`AppConfig::validate`] rejects the
    /// configuration.
    pub fn try_new(config: AppConfig) -> Result<Self, RackError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Sets the document's `modified` timestamp (builder style).
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.document.metadata_mut().set_modified(modified);
        self
    }

    /// Returns the configuration the builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the layout used to compute geometry.
    pub fn layout(&self) -> &RackLayout {
        &self.layout
    }

    /// Returns the document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Looks up a rack by name.
    pub fn rack(&self, name: &str) -> Option<&RackEntry> {
        self.racks.get(name)
    }

    /// Add a rack on a new page named after it.
    ///
    /// The rack is centered on the page and its height follows from `units`.
    /// The rack name is indexed for later [`create_device`](Self::create_device)
    /// calls. Adding a rack whose name is already indexed adds a second rack
    /// and points the name at the new one; devices already placed stay in
    /// the earlier rack.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::InvalidUnitCount`] if `units` is zero.
    pub fn create_rack(&mut self, name: &str, units: u32) -> Result<CellId, RackError> {
        self.add_rack(name, units).map(|entry| entry.id)
    }

    /// Add a rack with the default capacity of 42 units.
    ///
    /// # Errors
    ///
    /// Never fails for the default capacity; the `Result` mirrors
    /// [`create_rack`](Self::create_rack).
    pub fn create_default_rack(&mut self, name: &str) -> Result<CellId, RackError> {
        self.create_rack(name, DEFAULT_RACK_UNITS)
    }

    /// Place a device in the rack named by `device`.
    ///
    /// If the rack does not exist yet it is created with the default
    /// capacity. The device's vertical position is derived from the rack
    /// capacity, `floor` and `height` only: placement outside the rack and
    /// overlapping devices are accepted as given.
    ///
    /// IP, purpose and status are written only when non-empty, followed by
    /// the `other_data` pairs and the explicit attributes in order.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::MalformedAttribute`] if `other_data` or an
    /// explicit attribute name is malformed. Nothing is added to the document
    /// in that case, not even an auto-created rack.
    pub fn create_device(&mut self, device: &DeviceSpec) -> Result<CellId, RackError> {
        let attributes = self.device_attributes(device)?;

        let rack = match self.racks.get(device.rack()) {
            Some(rack) => rack.clone(),
            None => {
                debug!(rack = device.rack(); "Creating rack for device on demand");
                self.add_rack(device.rack(), DEFAULT_RACK_UNITS)?
            }
        };

        let device_id = self.ids.next_id(device.kind());
        let bounds = self
            .layout
            .device_bounds(rack.units, device.floor(), device.height());
        let style = self.layout.device_style(self.icons.shape_for(device.kind()));

        if !self.icons.contains(device.kind()) {
            debug!(kind = device.kind(); "No icon mapped for device type, using fallback");
        }

        self.document.page_mut(rack.page).push_cell(DeviceCell::new(
            device_id.clone(),
            device.name(),
            rack.id.clone(),
            attributes,
            bounds,
            style,
        ));

        info!(
            device = device.name(),
            id = device_id.as_str(),
            rack = device.rack(),
            floor = device.floor(),
            height = device.height();
            "Device placed"
        );

        Ok(device_id)
    }

    /// Write the document to `path` as UTF-8 draw.io XML.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Io`] if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), RackError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Writing draw.io file");

        let file = File::create(path)?;
        let mut exporter = DrawioExporter::new(BufWriter::new(file), self.layout.page_size());
        exporter.export_document(&self.document)?;

        info!(
            path = path.display().to_string(),
            pages = self.document.pages().len();
            "draw.io file written"
        );
        Ok(())
    }

    /// Render the document as draw.io XML.
    pub fn render_to_string(&self) -> String {
        let root = export::drawio::to_element(&self.document, self.layout.page_size());
        format!("{}\n{root}", xml::DECLARATION)
    }

    /// Creates the page, rack and marker cells and indexes the rack.
    fn add_rack(&mut self, name: &str, units: u32) -> Result<RackEntry, RackError> {
        if units == 0 {
            return Err(RackError::InvalidUnitCount {
                rack: name.to_string(),
            });
        }

        let page_index = self.document.push_page();
        let rack_id = self.ids.next_id(RACK_ID_PREFIX);
        let marker_id = self.ids.next_id(MARKER_ID_PREFIX);
        let bounds = self.layout.rack_bounds(units);

        let page = self.document.page_mut(page_index);
        page.set_name(name);
        page.push_cell(RackCell::new(
            rack_id.clone(),
            name,
            units,
            bounds,
            self.layout.rack_style(),
        ));
        page.push_cell(MarkerCell::new(
            marker_id,
            self.layout.marker_bounds(&bounds),
            self.layout.marker_style(),
        ));

        let entry = RackEntry {
            id: rack_id,
            units,
            page: page_index,
        };
        if let Some(previous) = self.racks.insert(name.to_string(), entry.clone()) {
            warn!(
                rack = name,
                previous_id = previous.id.as_str(),
                new_id = entry.id.as_str();
                "Rack name registered again, later devices go to the new rack"
            );
        }

        info!(rack = name, id = entry.id.as_str(), units; "Rack created");
        trace!(bounds:? = bounds; "Rack geometry");

        Ok(entry)
    }

    /// Collects the metadata attributes of `device` in output order.
    fn device_attributes(&self, device: &DeviceSpec) -> Result<Vec<(String, String)>, RackError> {
        let names = self.config.attributes();
        let mut attributes: Vec<(String, String)> = [
            (names.ip(), device.ip()),
            (names.purpose(), device.purpose()),
            (names.status(), device.status()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        attributes.extend(attributes::parse_other_data(device.other_data())?);

        for (key, value) in device.attributes() {
            attributes::validate_name(key)?;
            attributes.push((key.clone(), value.clone()));
        }

        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::model::Cell;

    fn device_cells(builder: &RackDiagramBuilder) -> Vec<&DeviceCell> {
        builder
            .document()
            .pages()
            .iter()
            .flat_map(|page| page.cells())
            .filter_map(|cell| match cell {
                Cell::Device(device) => Some(device),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_builder_has_no_pages() {
        let builder = RackDiagramBuilder::default();
        assert!(builder.document().pages().is_empty());
        assert!(builder.rack("R1").is_none());
    }

    #[test]
    fn test_create_rack_adds_page_rack_and_marker() {
        let mut builder = RackDiagramBuilder::default();
        let id = builder.create_rack("R1", 42).unwrap();

        let pages = builder.document().pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name(), "R1");
        assert_eq!(pages[0].id(), "rack-1");

        let cells = pages[0].cells();
        assert_eq!(cells.len(), 2);
        assert!(matches!(&cells[0], Cell::Rack(rack) if rack.id() == &id && rack.units() == 42));
        assert!(matches!(&cells[1], Cell::Marker(_)));
        assert_eq!(builder.rack("R1").unwrap().id(), &id);
    }

    #[test]
    fn test_default_rack_has_42_units() {
        let mut builder = RackDiagramBuilder::default();
        builder.create_default_rack("R1").unwrap();

        let entry = builder.rack("R1").unwrap();
        assert_eq!(entry.units(), 42);
        let Cell::Rack(rack) = &builder.document().pages()[0].cells()[0] else {
            panic!("Expected rack cell first");
        };
        assert!(approx_eq!(f64, rack.bounds().height(), 42.0 * 19.5 + 43.0, epsilon = 1e-9));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let reserved: AppConfig = toml::from_str("[attributes]\nip = \"id\"\n").unwrap();
        assert!(matches!(
            RackDiagramBuilder::try_new(reserved),
            Err(RackError::Config(_))
        ));

        let spaced: AppConfig =
            toml::from_str("[attributes]\nip = \"ip address\"\n").unwrap();
        assert!(matches!(
            RackDiagramBuilder::try_new(spaced),
            Err(RackError::Config(_))
        ));

        assert!(RackDiagramBuilder::try_new(AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_unit_rack_is_rejected() {
        let mut builder = RackDiagramBuilder::default();
        let err = builder.create_rack("empty", 0).unwrap_err();

        assert!(matches!(err, RackError::InvalidUnitCount { ref rack } if rack == "empty"));
        assert!(builder.document().pages().is_empty());
    }

    #[test]
    fn test_device_example_position() {
        let mut builder = RackDiagramBuilder::default();
        builder.create_rack("R1", 42).unwrap();
        builder
            .create_device(&DeviceSpec::new("srv1", "server", "R1", 1, 2))
            .unwrap();

        let devices = device_cells(&builder);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].bounds().y(), 781.5);
        assert!(approx_eq!(f64, devices[0].bounds().height(), 39.0, ulps = 2));
        assert_eq!(devices[0].parent(), builder.rack("R1").unwrap().id());
        assert!(devices[0].id().as_str().starts_with("server_"));
    }

    #[test]
    fn test_device_goes_to_its_racks_page() {
        let mut builder = RackDiagramBuilder::default();
        builder.create_rack("R1", 42).unwrap();
        builder.create_rack("R2", 42).unwrap();
        builder
            .create_device(&DeviceSpec::new("srv1", "server", "R1", 1, 1))
            .unwrap();

        let pages = builder.document().pages();
        assert_eq!(pages[0].cells().len(), 3);
        assert_eq!(pages[1].cells().len(), 2);
    }

    #[test]
    fn test_metadata_attributes_are_conditional() {
        let mut builder = RackDiagramBuilder::default();
        builder
            .create_device(
                &DeviceSpec::new("srv1", "server", "R1", 1, 1)
                    .with_ip("10.0.0.1")
                    .with_status("active")
                    .with_other_data("a:1|b:2")
                    .with_attribute("owner", "ops"),
            )
            .unwrap();

        let devices = device_cells(&builder);
        let attributes: Vec<(&str, &str)> = devices[0]
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            attributes,
            vec![
                ("IP", "10.0.0.1"),
                ("status", "active"),
                ("a", "1"),
                ("b", "2"),
                ("owner", "ops")
            ]
        );
    }

    #[test]
    fn test_malformed_other_data_leaves_no_trace() {
        let mut builder = RackDiagramBuilder::default();
        let err = builder
            .create_device(&DeviceSpec::new("srv1", "server", "R9", 1, 1).with_other_data("bad"))
            .unwrap_err();

        assert!(matches!(
            err,
            RackError::MalformedAttribute {
                issue: AttributeIssue::MissingSeparator,
                ..
            }
        ));
        assert!(builder.rack("R9").is_none());
        assert!(builder.document().pages().is_empty());
    }

    #[test]
    fn test_reserved_explicit_attribute_is_rejected() {
        let mut builder = RackDiagramBuilder::default();
        builder.create_rack("R1", 42).unwrap();
        let result = builder
            .create_device(&DeviceSpec::new("srv1", "server", "R1", 1, 1).with_attribute("id", "x"));

        assert!(result.is_err());
        assert!(device_cells(&builder).is_empty());
    }

    #[test]
    fn test_duplicate_rack_name_repoints_index() {
        let mut builder = RackDiagramBuilder::default();
        let first = builder.create_rack("R1", 42).unwrap();
        let second = builder.create_rack("R1", 24).unwrap();

        assert_ne!(first, second);
        let entry = builder.rack("R1").unwrap();
        assert_eq!(entry.id(), &second);
        assert_eq!(entry.units(), 24);
        assert_eq!(entry.page(), 1);
    }

    #[test]
    fn test_unknown_type_uses_fallback_icon() {
        let mut builder = RackDiagramBuilder::default();
        builder
            .create_device(&DeviceSpec::new("pdu", "pdu", "R1", 1, 1))
            .unwrap();

        let devices = device_cells(&builder);
        assert_eq!(
            devices[0].style().get("shape"),
            Some(icons::FALLBACK_SHAPE)
        );
        assert!(devices[0].id().as_str().starts_with("pdu_"));
    }

    #[test]
    fn test_configured_attribute_names() {
        let config: AppConfig =
            toml::from_str("[attributes]\npurpose = \"用途\"\nstatus = \"状态\"\n").unwrap();
        let mut builder = RackDiagramBuilder::new(config);
        builder
            .create_device(
                &DeviceSpec::new("srv1", "server", "R1", 1, 1)
                    .with_purpose("web")
                    .with_status("online"),
            )
            .unwrap();

        let devices = device_cells(&builder);
        assert_eq!(
            devices[0].attributes(),
            &[
                ("用途".to_string(), "web".to_string()),
                ("状态".to_string(), "online".to_string())
            ]
        );
    }
}
