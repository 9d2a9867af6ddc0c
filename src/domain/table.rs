use super::{Address, Placemark};
use std::collections::BTreeMap;
use thiserror::Error;

/// A location column whose length does not match the table's row count.
#[derive(Debug, Error)]
#[error("location column {column} has {values} entries for {rows} rows")]
pub struct ColumnShapeError {
    pub column: String,
    pub values: usize,
    pub rows: usize,
}

/// The in-memory output of the pipeline: placemark rows in document order,
/// plus zero or more named location columns added by enrichment.
///
/// A location column holds one entry per row; `None` means the provider
/// answered but had no address for the coordinates. Column presence is the
/// idempotence key: enrichment skips providers whose column already exists.
#[derive(Debug, Clone, Default)]
pub struct PlacemarkTable {
    rows: Vec<Placemark>,
    locations: BTreeMap<String, Vec<Option<Address>>>,
}

impl PlacemarkTable {
    pub fn new(rows: Vec<Placemark>) -> Self {
        Self {
            rows,
            locations: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> &[Placemark] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column name for a provider, e.g. `location_Nominatim`.
    pub fn location_column_name(provider: &str) -> String {
        format!("location_{provider}")
    }

    pub fn has_location_column(&self, column: &str) -> bool {
        self.locations.contains_key(column)
    }

    /// Insert a location column holding one entry per row.
    pub fn set_location_column(
        &mut self,
        column: &str,
        values: Vec<Option<Address>>,
    ) -> Result<(), ColumnShapeError> {
        if values.len() != self.rows.len() {
            return Err(ColumnShapeError {
                column: column.to_string(),
                values: values.len(),
                rows: self.rows.len(),
            });
        }
        self.locations.insert(column.to_string(), values);
        Ok(())
    }

    pub fn location_column(&self, column: &str) -> Option<&[Option<Address>]> {
        self.locations.get(column).map(Vec::as_slice)
    }

    pub fn location_columns(&self) -> impl Iterator<Item = (&str, &[Option<Address>])> {
        self.locations
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// `(lat, lon)` reverse-geocoding keys for every row, in row order.
    pub fn coords_for_reverse(&self) -> Vec<(f64, f64)> {
        self.rows.iter().map(Placemark::coords_for_reverse).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, long: f64, lat: f64) -> Placemark {
        Placemark {
            name: name.to_string(),
            timestamp: String::new(),
            color: String::new(),
            coords_long: long,
            coords_lat: lat,
            category: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let table = PlacemarkTable::new(vec![row("a", 1.0, 2.0), row("b", 3.0, 4.0)]);
        let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_coords_for_reverse_swaps_to_lat_first() {
        let table = PlacemarkTable::new(vec![row("a", 1.5, 2.5)]);
        assert_eq!(table.coords_for_reverse(), vec![(2.5, 1.5)]);
    }

    #[test]
    fn test_location_column_roundtrip() {
        let mut table = PlacemarkTable::new(vec![row("a", 1.0, 2.0)]);
        let column = PlacemarkTable::location_column_name("Nominatim");
        assert_eq!(column, "location_Nominatim");
        assert!(!table.has_location_column(&column));

        table.set_location_column(&column, vec![None]).unwrap();
        assert!(table.has_location_column(&column));
        assert_eq!(table.location_column(&column).unwrap().len(), 1);
    }

    #[test]
    fn test_location_column_length_mismatch_rejected() {
        let mut table = PlacemarkTable::new(vec![row("a", 1.0, 2.0)]);
        let err = table
            .set_location_column("location_Nominatim", vec![])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "location column location_Nominatim has 0 entries for 1 rows"
        );
        assert!(!table.has_location_column("location_Nominatim"));
    }
}
