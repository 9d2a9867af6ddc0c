use serde::Serialize;

/// A single saved point of interest parsed from a KML placemark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    /// Display label. The English extended-data name wins over the default
    /// when both exist and differ.
    pub name: String,
    /// `<TimeStamp><when>` text, kept verbatim (not parsed).
    pub timestamp: String,
    /// `<styleUrl>` with the `#placemark-` prefix stripped.
    pub color: String,
    pub coords_long: f64,
    pub coords_lat: f64,
    /// `;`-joined feature-type tags, in document order. Empty when none.
    pub category: String,
    /// Icon identifier, empty when the export has none.
    pub icon: String,
}

impl Placemark {
    /// The `(lat, lon)` pair used as the reverse-geocoder query key.
    /// Note the swap: KML coordinates are longitude-first.
    pub fn coords_for_reverse(&self) -> (f64, f64) {
        (self.coords_lat, self.coords_long)
    }

    /// Category tags as individual strings.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category.split(';').filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Placemark {
        Placemark {
            name: "Cafe".to_string(),
            timestamp: "2019-02-09T10:00:00Z".to_string(),
            color: "red".to_string(),
            coords_long: 1.5,
            coords_lat: 2.5,
            category: "cat1;cat2".to_string(),
            icon: "star".to_string(),
        }
    }

    #[test]
    fn test_coords_for_reverse_is_lat_first() {
        assert_eq!(sample().coords_for_reverse(), (2.5, 1.5));
    }

    #[test]
    fn test_categories_split() {
        let p = sample();
        let cats: Vec<&str> = p.categories().collect();
        assert_eq!(cats, vec!["cat1", "cat2"]);
    }

    #[test]
    fn test_categories_empty() {
        let p = Placemark {
            category: String::new(),
            ..sample()
        };
        assert_eq!(p.categories().count(), 0);
    }
}
