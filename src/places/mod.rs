//! Extension points for turning enriched placemarks into a canonical place
//! list and measuring distances between entries.
//!
//! No deduplication or distance algorithm ships with the crate; these traits
//! are the typed contracts for plugging one in.

use crate::domain::{Address, PlacemarkTable};
use serde::Serialize;

/// A deduplicated place aggregated from one or more placemark rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub coords_lat: f64,
    pub coords_long: f64,
    pub address: Option<Address>,
    /// Indices of the table rows folded into this place.
    pub source_rows: Vec<usize>,
}

/// Strategy for collapsing an enriched table into distinct places, typically
/// keyed by address components.
pub trait PlaceDeduper {
    fn extract_places(&self, table: &PlacemarkTable) -> Vec<Place>;
}

/// Distance in meters between two `(lat, lon)` points.
pub trait DistanceMetric {
    fn distance_m(&self, a: (f64, f64), b: (f64, f64)) -> f64;
}

/// Pairwise distance grid over a place list, using the injected metric.
/// Entry `[i][j]` is the distance from place `i` to place `j`.
pub fn distance_matrix(places: &[Place], metric: &dyn DistanceMetric) -> Vec<Vec<f64>> {
    places
        .iter()
        .map(|a| {
            places
                .iter()
                .map(|b| {
                    metric.distance_m(
                        (a.coords_lat, a.coords_long),
                        (b.coords_lat, b.coords_long),
                    )
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degenerate metric for pinning down the contract.
    struct Manhattan;

    impl DistanceMetric for Manhattan {
        fn distance_m(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
            (a.0 - b.0).abs() + (a.1 - b.1).abs()
        }
    }

    fn place(name: &str, lat: f64, long: f64) -> Place {
        Place {
            name: name.to_string(),
            coords_lat: lat,
            coords_long: long,
            address: None,
            source_rows: vec![],
        }
    }

    #[test]
    fn test_distance_matrix_shape_and_symmetry() {
        let places = vec![place("a", 0.0, 0.0), place("b", 1.0, 2.0)];
        let matrix = distance_matrix(&places, &Manhattan);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[0][1], 3.0);
        assert_eq!(matrix[1][0], 3.0);
    }

    #[test]
    fn test_distance_matrix_empty() {
        let matrix = distance_matrix(&[], &Manhattan);
        assert!(matrix.is_empty());
    }
}
