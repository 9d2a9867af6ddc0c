//! End-to-end pipeline: read file, extract placemarks, enrich.

use crate::config::GeocoderConfig;
use crate::domain::PlacemarkTable;
use crate::enrich::{ProviderReport, enrich};
use crate::kml::{KmlDocument, extract_placemarks};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Read and extract a KML file into a table, without any network access.
pub fn load_table(path: &Path) -> Result<PlacemarkTable> {
    let document = KmlDocument::from_file(path)
        .with_context(|| format!("failed to load KML file {}", path.display()))?;
    let parsed = document
        .parse()
        .with_context(|| format!("failed to parse KML file {}", path.display()))?;
    let rows = extract_placemarks(&parsed)
        .with_context(|| format!("failed to extract placemarks from {}", path.display()))?;

    info!("extracted {} placemarks from {}", rows.len(), path.display());
    Ok(PlacemarkTable::new(rows))
}

/// The full pipeline: extraction (fail-fast) followed by enrichment against
/// both providers (fail-soft, reported per provider).
pub fn process_file(
    path: &Path,
    config: &GeocoderConfig,
) -> Result<(PlacemarkTable, Vec<ProviderReport>)> {
    let mut table = load_table(path)?;
    let reports = enrich(&mut table, config);
    Ok((table, reports))
}
