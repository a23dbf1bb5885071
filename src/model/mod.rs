use serde::{Deserialize, Serialize};

/// Identifier assigned to a device by the dashboard. It is the primary key for
/// every per-device endpoint.
pub type Serial = String;

/// A tenant visible to the API key. Each organization yields one report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// Product family reported in the `productType` field of a device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Managed switch.
    Switch,
    /// Wireless access point.
    Wireless,
    /// Security camera.
    Camera,
    /// Anything else (appliances, sensors, cellular gateways, ...).
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of the organization device status listing.
///
/// Optional fields are frequently `null` for offline or unnamed devices; they
/// render as empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: Serial,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub product_type: ProductType,
}

impl Device {
    /// The six identity columns shared by every report section, in order.
    pub fn identity_cells(&self) -> [String; 6] {
        [
            self.name.clone().unwrap_or_default(),
            self.model.clone().unwrap_or_default(),
            self.mac.clone().unwrap_or_default(),
            self.serial.clone(),
            self.lan_ip.clone().unwrap_or_default(),
            self.status.clone().unwrap_or_default(),
        ]
    }
}

/// Status of a single switch port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPort {
    pub port_id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: Option<String>,
}

/// Port status value marking a port with an active link.
pub const CONNECTED_STATUS: &str = "Connected";

/// Channel utilization record for one access point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUtilization {
    #[serde(default)]
    pub serial: Option<Serial>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub by_band: Vec<BandUtilization>,
}

/// Utilization figures for one radio band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandUtilization {
    pub band: String,
    pub wifi: Percentage,
    pub non_wifi: Percentage,
    pub total: Percentage,
}

/// Wrapper matching the `{"percentage": n}` objects used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    pub percentage: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BandUtilization>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<BandUtilization>>::deserialize(deserializer)?.unwrap_or_default())
}

/// State of one band's three utilization columns for an access point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BandReading {
    /// The band never appeared in a non-empty response; cells stay unwritten.
    #[default]
    NotReported,
    /// The response carried no band data at all; cells hold empty strings.
    NoData,
    /// Percentages reported by the API.
    Measured { wifi: f64, non_wifi: f64, total: f64 },
}

impl From<&BandUtilization> for BandReading {
    fn from(band: &BandUtilization) -> Self {
        BandReading::Measured {
            wifi: band.wifi.percentage,
            non_wifi: band.non_wifi.percentage,
            total: band.total.percentage,
        }
    }
}

/// Both band readings of an access point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandReadings {
    pub band_24: BandReading,
    pub band_5: BandReading,
}

/// A switch together with its aggregated port lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    pub device: Device,
    pub enabled_ports: String,
    pub connected_ports: String,
}

/// An access point together with its radio utilization and client count.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPointReport {
    pub device: Device,
    pub bands: BandReadings,
    pub clients: usize,
}
