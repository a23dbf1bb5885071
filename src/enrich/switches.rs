use tracing::{debug, info, instrument};

use crate::api::DashboardClient;
use crate::error::Result;
use crate::model::{CONNECTED_STATUS, Device, SwitchPort, SwitchReport};

/// Comma-joined port identifiers of one switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSummary {
    pub enabled: String,
    pub connected: String,
}

/// Collects enabled ports, and the enabled ports with an active link, in the
/// order the API returned them. Repeated identifiers are kept.
pub fn summarize_ports(ports: &[SwitchPort]) -> PortSummary {
    let mut enabled = Vec::new();
    let mut connected = Vec::new();

    for port in ports.iter().filter(|port| port.enabled) {
        enabled.push(port.port_id.as_str());
        if port.status.as_deref() == Some(CONNECTED_STATUS) {
            connected.push(port.port_id.as_str());
        }
    }

    PortSummary {
        enabled: enabled.join(","),
        connected: connected.join(","),
    }
}

/// Fetches port statuses for every switch, one request per switch.
#[instrument(level = "info", skip_all, fields(switch_count = switches.len()))]
pub fn enrich_switches(
    client: &DashboardClient,
    switches: Vec<Device>,
) -> Result<Vec<SwitchReport>> {
    let mut reports = Vec::with_capacity(switches.len());

    for device in switches {
        let ports = client.switch_port_statuses(&device.serial)?;
        debug!(serial = %device.serial, port_count = ports.len(), "fetched switch ports");
        let summary = summarize_ports(&ports);
        reports.push(SwitchReport {
            device,
            enabled_ports: summary.enabled,
            connected_ports: summary.connected,
        });
    }

    info!(switch_count = reports.len(), "switch ports aggregated");
    Ok(reports)
}
