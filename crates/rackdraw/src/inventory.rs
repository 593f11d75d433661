//! Rack inventories loaded from TOML.
//!
//! An inventory lists racks and devices the way a spreadsheet export would:
//!
//! ```toml
//! [[racks]]
//! name = "R1"
//! units = 42
//!
//! [[devices]]
//! name = "core-sw-01"
//! type = "router"
//! rack = "R1"
//! floor = 40
//! height = 2
//! ip = "10.0.0.1"
//! other_data = "serial:CN-0X1234|owner:netops"
//! ```
//!
//! Racks that devices refer to but that are not listed are created with the
//! default capacity when the device is placed.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use crate::{DeviceSpec, RackDiagramBuilder, RackError, layout::DEFAULT_RACK_UNITS};

/// A list of racks and devices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Inventory {
    #[serde(default)]
    racks: Vec<RackRecord>,

    #[serde(default)]
    devices: Vec<DeviceRecord>,
}

/// One rack entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RackRecord {
    name: String,

    #[serde(default = "default_units")]
    units: u32,
}

/// One device entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceRecord {
    name: String,

    #[serde(rename = "type")]
    kind: String,

    rack: String,

    floor: i32,

    #[serde(default = "default_height")]
    height: u32,

    #[serde(default)]
    ip: String,

    #[serde(default)]
    purpose: String,

    #[serde(default)]
    status: String,

    #[serde(default)]
    other_data: String,

    /// Extra attributes written as a TOML table instead of `other_data`.
    #[serde(default)]
    attributes: IndexMap<String, String>,
}

fn default_units() -> u32 {
    DEFAULT_RACK_UNITS
}

fn default_height() -> u32 {
    1
}

impl Inventory {
    /// Parses an inventory from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`RackError::Inventory`] with the location of the problem if
    /// the source is not valid TOML or does not match the inventory layout.
    pub fn from_toml(src: &str) -> Result<Self, RackError> {
        toml::from_str(src).map_err(|err| RackError::new_inventory_error(err, src))
    }

    pub fn racks(&self) -> &[RackRecord] {
        &self.racks
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Creates every rack, then every device, in listing order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error reported by the builder.
    pub fn apply(&self, builder: &mut RackDiagramBuilder) -> Result<(), RackError> {
        info!(
            racks = self.racks.len(),
            devices = self.devices.len();
            "Applying inventory"
        );

        for rack in &self.racks {
            builder.create_rack(&rack.name, rack.units)?;
        }

        for device in &self.devices {
            debug!(device = device.name, rack = device.rack; "Placing inventory device");
            builder.create_device(&device.to_spec())?;
        }

        Ok(())
    }
}

impl RackRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> u32 {
        self.units
    }
}

impl DeviceRecord {
    /// Converts the record into a [`DeviceSpec`].
    pub fn to_spec(&self) -> DeviceSpec {
        let spec = DeviceSpec::new(
            self.name.as_str(),
            self.kind.as_str(),
            self.rack.as_str(),
            self.floor,
            self.height,
        )
        .with_ip(self.ip.as_str())
        .with_purpose(self.purpose.as_str())
        .with_status(self.status.as_str())
        .with_other_data(self.other_data.as_str());

        self.attributes
            .iter()
            .fold(spec, |spec, (key, value)| spec.with_attribute(key.as_str(), value.as_str()))
    }
}
