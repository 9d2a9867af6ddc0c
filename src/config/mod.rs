use log::warn;
use serde::Deserialize;
use std::path::PathBuf;

fn default_user_agent() -> String {
    "placemarks/0.1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_min_delay_secs() -> u64 {
    2
}

fn default_retry_backoff_secs() -> u64 {
    5
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_arcgis_url() -> String {
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/reverseGeocode"
        .to_string()
}

/// Settings shared by both reverse-geocoding providers.
///
/// The 2 second minimum delay honors the providers' fair-use policies; each
/// provider gets its own independent rate limiter.
#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: u64,
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    #[serde(default = "default_arcgis_url")]
    pub arcgis_url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            min_delay_secs: default_min_delay_secs(),
            retry_backoff_secs: default_retry_backoff_secs(),
            nominatim_url: default_nominatim_url(),
            arcgis_url: default_arcgis_url(),
        }
    }
}

/// Optional on-disk configuration (`placemarks.toml`).
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub geocoder: Option<GeocoderConfig>,
}

impl FileConfig {
    /// Load the first parseable config file from the search paths, if any.
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!("failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// The geocoder section, falling back to defaults when absent.
    pub fn geocoder(self) -> GeocoderConfig {
        self.geocoder.unwrap_or_default()
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("placemarks.toml"));
    paths.push(PathBuf::from(".placemarks.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("placemarks").join("config.toml"));
        paths.push(config_dir.join("placemarks.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".placemarks.toml"));
        paths.push(home.join(".config").join("placemarks").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeocoderConfig::default();
        assert_eq!(config.min_delay_secs, 2);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.nominatim_url.contains("/reverse"));
        assert!(config.arcgis_url.contains("reverseGeocode"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            [geocoder]
            user_agent = "my-places/1.0"
            min_delay_secs = 5
            "#,
        )
        .unwrap();

        let config = file.geocoder();
        assert_eq!(config.user_agent, "my-places/1.0");
        assert_eq!(config.min_delay_secs, 5);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert_eq!(file.geocoder().min_delay_secs, 2);
    }
}
