//! Description of a device to place in a rack.

/// Everything needed to place one device.
///
/// Only the name, type, rack, floor and height are required; the metadata
/// setters are optional and empty values are not written.
///
/// # Examples
///
/// ```
/// use rackdraw::DeviceSpec;
///
/// let device = DeviceSpec::new("web-01", "server", "R1", 10, 2)
///     .with_ip("10.0.0.11")
///     .with_purpose("frontend")
///     .with_other_data("serial:CN-0X1234|owner:web");
///
/// assert_eq!(device.rack(), "R1");
/// assert_eq!(device.other_data(), "serial:CN-0X1234|owner:web");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSpec {
    name: String,
    kind: String,
    rack: String,
    floor: i32,
    height: u32,
    ip: String,
    purpose: String,
    status: String,
    other_data: String,
    attributes: Vec<(String, String)>,
}

impl DeviceSpec {
    /// Creates a device named `name` of type `kind`, occupying `height` units
    /// of rack `rack` starting at unit `floor` (1 is the bottom unit).
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        rack: impl Into<String>,
        floor: i32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            rack: rack.into(),
            floor,
            height,
            ..Self::default()
        }
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets free-form metadata written as `key:value` pairs separated by `|`.
    pub fn with_other_data(mut self, other_data: impl Into<String>) -> Self {
        self.other_data = other_data.into();
        self
    }

    /// Adds a single metadata attribute, written after the `other_data` pairs.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Display name of the device
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device type, used to pick the icon and prefix the identifier
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Name of the rack holding the device
    pub fn rack(&self) -> &str {
        &self.rack
    }

    /// Lowest unit occupied, counted from 1 at the bottom
    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Number of units occupied
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn other_data(&self) -> &str {
        &self.other_data
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}
