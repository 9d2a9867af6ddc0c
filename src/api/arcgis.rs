use super::{GeocodeError, ReverseGeocoder};
use crate::config::GeocoderConfig;
use crate::domain::Address;
use serde::Deserialize;
use std::time::Duration;

/// Esri ArcGIS World GeocodeServer reverse geocoder.
///
/// Free reverse lookups need no API key. The service reports all failures,
/// including "no address at this location", inside a 200 body; the not-found
/// case maps to `Ok(None)`, everything else to `GeocodeError::Provider`.
pub struct ArcGisGeocoder {
    client: reqwest::blocking::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ArcGisReverseResult {
    #[serde(default)]
    address: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ArcGisApiError>,
}

#[derive(Debug, Deserialize)]
struct ArcGisApiError {
    code: i64,
    message: String,
}

impl ArcGisGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Init(e.to_string()))?;

        Ok(Self {
            client,
            url: config.arcgis_url.clone(),
        })
    }
}

impl ReverseGeocoder for ArcGisGeocoder {
    fn name(&self) -> &'static str {
        "ArcGIS"
    }

    fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Address>, GeocodeError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                // x,y ordering: longitude first
                ("location", format!("{lon},{lat}")),
                ("f", "json".to_string()),
                ("langCode", "en".to_string()),
            ])
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let result: ArcGisReverseResult = response
            .json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        if let Some(error) = result.error {
            if error.message.contains("Unable to find") {
                return Ok(None);
            }
            return Err(GeocodeError::Provider {
                code: error.code,
                message: error.message,
            });
        }

        let Some(address) = result.address else {
            return Ok(None);
        };

        let display_name = address
            .get("LongLabel")
            .or_else(|| address.get("Match_addr"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        if display_name.is_empty() {
            return Ok(None);
        }

        Ok(Some(Address::new(display_name, address)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reverse_response() {
        let json = r#"{
            "address": {
                "Match_addr": "Bahnhofstrasse 1, 8001, Zurich",
                "LongLabel": "Bahnhofstrasse 1, 8001, Zurich, CHE",
                "City": "Zurich",
                "CntryName": "Switzerland"
            },
            "location": {"x": 8.5391, "y": 47.3686}
        }"#;
        let result: ArcGisReverseResult = serde_json::from_str(json).unwrap();

        let address = result.address.unwrap();
        assert_eq!(address["LongLabel"], "Bahnhofstrasse 1, 8001, Zurich, CHE");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_not_found_response() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "Unable to find address for the specified location.",
                "details": []
            }
        }"#;
        let result: ArcGisReverseResult = serde_json::from_str(json).unwrap();

        let error = result.error.unwrap();
        assert_eq!(error.code, 400);
        assert!(error.message.contains("Unable to find"));
    }
}
