use super::{GeocodeError, ReverseGeocoder};
use crate::config::GeocoderConfig;
use crate::domain::Address;
use serde::Deserialize;
use std::time::Duration;

/// OpenStreetMap Nominatim reverse geocoder.
///
/// Queries `/reverse` with `format=jsonv2` and English results. Nominatim
/// reports "nothing here" as a 200 response carrying an `error` field, which
/// maps to `Ok(None)`.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimReverseResult {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Init(e.to_string()))?;

        Ok(Self {
            client,
            url: config.nominatim_url.clone(),
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn name(&self) -> &'static str {
        "Nominatim"
    }

    fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Address>, GeocodeError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "jsonv2".to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let result: NominatimReverseResult = response
            .json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        if result.error.is_some() {
            return Ok(None);
        }

        match result.display_name {
            Some(display_name) => Ok(Some(Address::new(display_name, result.address))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reverse_response() {
        let json = r#"{
            "display_name": "Bahnhofstrasse 1, 8001 Zurich, Switzerland",
            "address": {"road": "Bahnhofstrasse", "city": "Zurich", "country_code": "ch"}
        }"#;
        let result: NominatimReverseResult = serde_json::from_str(json).unwrap();

        assert_eq!(
            result.display_name.as_deref(),
            Some("Bahnhofstrasse 1, 8001 Zurich, Switzerland")
        );
        assert_eq!(result.address["city"], "Zurich");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_unable_to_geocode_response() {
        // Nominatim answers 200 with an error body for open-ocean coordinates
        let json = r#"{"error": "Unable to geocode"}"#;
        let result: NominatimReverseResult = serde_json::from_str(json).unwrap();

        assert!(result.display_name.is_none());
        assert_eq!(result.error.as_deref(), Some("Unable to geocode"));
    }
}
