use serde::{Deserialize, Serialize};

/// A structured address returned by a reverse-geocoding provider.
///
/// Providers disagree on component naming, so beyond the display line the
/// components are kept as the raw JSON object the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub display_name: String,
    #[serde(default)]
    pub components: serde_json::Value,
}

impl Address {
    pub fn new(display_name: impl Into<String>, components: serde_json::Value) -> Self {
        Self {
            display_name: display_name.into(),
            components,
        }
    }

    /// Look up a single address component by its provider-specific key.
    pub fn component(&self, key: &str) -> Option<&str> {
        self.components.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_lookup() {
        let addr = Address::new(
            "Bahnhofstrasse 1, Zurich, Switzerland",
            json!({"city": "Zurich", "country_code": "ch"}),
        );
        assert_eq!(addr.component("city"), Some("Zurich"));
        assert_eq!(addr.component("street"), None);
    }
}
