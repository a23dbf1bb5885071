//! Per-device telemetry lookups layered on top of the classified inventory.

pub mod switches;
pub mod wireless;

pub use switches::{PortSummary, enrich_switches, summarize_ports};
pub use wireless::{band_readings, enrich_access_points};
