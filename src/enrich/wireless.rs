use tracing::{debug, info, instrument, warn};

use crate::api::DashboardClient;
use crate::error::Result;
use crate::model::{AccessPointReport, BandReading, BandReadings, Device, DeviceUtilization};

pub const BAND_24: &str = "2.4";
pub const BAND_5: &str = "5";

/// Folds utilization records into per-band readings.
///
/// A record with no band data marks both bands as [`BandReading::NoData`].
/// Otherwise only the bands present are set; later records win. Labels other
/// than `2.4` and `5` are skipped.
pub fn band_readings(records: &[DeviceUtilization]) -> BandReadings {
    let mut readings = BandReadings::default();

    for record in records {
        if record.by_band.is_empty() {
            readings.band_24 = BandReading::NoData;
            readings.band_5 = BandReading::NoData;
            continue;
        }

        for band in &record.by_band {
            match band.band.as_str() {
                BAND_24 => readings.band_24 = BandReading::from(band),
                BAND_5 => readings.band_5 = BandReading::from(band),
                other => warn!(band = other, "ignoring utilization for unsupported band"),
            }
        }
    }

    readings
}

/// Fetches utilization and client counts for every access point, two
/// requests per device.
#[instrument(level = "info", skip_all, fields(org_id = %org_id, ap_count = access_points.len()))]
pub fn enrich_access_points(
    client: &DashboardClient,
    org_id: &str,
    access_points: Vec<Device>,
) -> Result<Vec<AccessPointReport>> {
    let mut reports = Vec::with_capacity(access_points.len());

    for device in access_points {
        let records = client.channel_utilization(org_id, &device.serial)?;
        let bands = band_readings(&records);
        let clients = client.client_count(&device.serial)?;
        debug!(serial = %device.serial, clients, "fetched wireless details");
        reports.push(AccessPointReport {
            device,
            bands,
            clients,
        });
    }

    info!(ap_count = reports.len(), "wireless details collected");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<DeviceUtilization> {
        serde_json::from_value(value).expect("utilization records")
    }

    fn band(label: &str, wifi: f64, non_wifi: f64, total: f64) -> serde_json::Value {
        json!({
            "band": label,
            "wifi": {"percentage": wifi},
            "nonWifi": {"percentage": non_wifi},
            "total": {"percentage": total}
        })
    }

    #[test]
    fn empty_by_band_marks_both_bands_without_data() {
        let readings = band_readings(&records(json!([{"serial": "A1", "byBand": []}])));

        assert_eq!(readings.band_24, BandReading::NoData);
        assert_eq!(readings.band_5, BandReading::NoData);
    }

    #[test]
    fn both_bands_are_measured() {
        let readings = band_readings(&records(json!([{
            "serial": "A1",
            "byBand": [band("2.4", 10.5, 2.0, 12.5), band("5", 4.0, 1.0, 5.0)]
        }])));

        assert_eq!(
            readings.band_24,
            BandReading::Measured {
                wifi: 10.5,
                non_wifi: 2.0,
                total: 12.5
            }
        );
        assert_eq!(
            readings.band_5,
            BandReading::Measured {
                wifi: 4.0,
                non_wifi: 1.0,
                total: 5.0
            }
        );
    }

    #[test]
    fn missing_band_stays_not_reported() {
        let readings = band_readings(&records(json!([{
            "serial": "A1",
            "byBand": [band("2.4", 1.0, 2.0, 3.0)]
        }])));

        assert!(matches!(readings.band_24, BandReading::Measured { .. }));
        assert_eq!(readings.band_5, BandReading::NotReported);
        assert_ne!(readings.band_5, BandReading::NoData);
    }

    #[test]
    fn unsupported_band_label_is_skipped() {
        let readings = band_readings(&records(json!([{
            "serial": "A1",
            "byBand": [band("6", 1.0, 1.0, 2.0)]
        }])));

        assert_eq!(readings, BandReadings::default());
    }

    #[test]
    fn no_records_leave_both_bands_unreported() {
        assert_eq!(band_readings(&[]), BandReadings::default());
    }
}
