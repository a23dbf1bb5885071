//! Blocking client for the handful of dashboard endpoints the reports need.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::model::{Device, DeviceUtilization, Organization, SwitchPort};

/// Header carrying the dashboard API key (`X-Cisco-Meraki-API-Key`).
pub const API_KEY_HEADER: &str = "x-cisco-meraki-api-key";

#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
    http: Client,
}

impl DashboardClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            ReportError::InvalidConfig("API key is not a valid header value".into())
        })?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Lists every organization the API key has access to.
    pub fn organizations(&self) -> Result<Vec<Organization>> {
        self.get_json("/organizations", &[])
    }

    /// Lists the devices of an organization along with their live status.
    pub fn device_statuses(&self, org_id: &str) -> Result<Vec<Device>> {
        self.get_json(&format!("/organizations/{org_id}/devices/statuses"), &[])
    }

    pub fn switch_port_statuses(&self, serial: &str) -> Result<Vec<SwitchPort>> {
        self.get_json(&format!("/devices/{serial}/switch/ports/statuses"), &[])
    }

    /// Fetches channel utilization for a single access point.
    pub fn channel_utilization(
        &self,
        org_id: &str,
        serial: &str,
    ) -> Result<Vec<DeviceUtilization>> {
        self.get_json(
            &format!("/organizations/{org_id}/wireless/devices/channelUtilization/byDevice"),
            &[("serials[]", serial)],
        )
    }

    /// Counts the clients currently associated with a device.
    pub fn client_count(&self, serial: &str) -> Result<usize> {
        let clients: Vec<Value> = self.get_json(&format!("/devices/{serial}/clients"), &[])?;
        Ok(clients.len())
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let body = request.send()?.error_for_status()?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> DashboardClient {
        DashboardClient::new(&Config::new(server.base_url(), "test-key")).expect("client")
    }

    #[test]
    fn sends_api_key_and_json_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/organizations")
                .header(API_KEY_HEADER, "test-key")
                .header("accept", "application/json")
                .header("content-type", "application/json");
            then.status(200)
                .json_body(json!([{"id": "1", "name": "Acme"}]));
        });

        let orgs = client_for(&server).organizations().expect("organizations");

        mock.assert();
        assert_eq!(
            orgs,
            vec![Organization {
                id: "1".into(),
                name: "Acme".into()
            }]
        );
    }

    #[test]
    fn utilization_passes_single_serial_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/organizations/7/wireless/devices/channelUtilization/byDevice")
                .query_param("serials[]", "Q2AP-0001");
            then.status(200).json_body(json!([{"serial": "Q2AP-0001", "byBand": []}]));
        });

        let records = client_for(&server)
            .channel_utilization("7", "Q2AP-0001")
            .expect("utilization");

        mock.assert();
        assert_eq!(records.len(), 1);
        assert!(records[0].by_band.is_empty());
    }

    #[test]
    fn client_count_uses_list_length() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/devices/Q2AP-0001/clients");
            then.status(200)
                .json_body(json!([{"id": "k1"}, {"id": "k2"}, {"id": "k3"}]));
        });

        let count = client_for(&server).client_count("Q2AP-0001").expect("count");

        assert_eq!(count, 3);
    }

    #[test]
    fn error_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/organizations");
            then.status(401).json_body(json!({"errors": ["Invalid API key"]}));
        });

        let error = client_for(&server).organizations().expect_err("unauthorised");

        assert!(matches!(error, ReportError::Http(_)));
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/devices/Q2SW/switch/ports/statuses");
            then.status(200).body("<html>maintenance</html>");
        });

        let error = client_for(&server)
            .switch_port_statuses("Q2SW")
            .expect_err("not json");

        assert!(matches!(error, ReportError::Json(_)));
    }
}
