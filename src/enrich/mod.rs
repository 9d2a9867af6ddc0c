//! Reverse-geocoding enrichment: fail-soft per provider, idempotent per
//! column, rate-limited per provider.

pub mod limiter;

use crate::api::{ArcGisGeocoder, GeocodeError, NominatimGeocoder, ReverseGeocoder};
use crate::config::GeocoderConfig;
use crate::domain::PlacemarkTable;
use log::{debug, error, info, warn};
use std::thread;
use std::time::Duration;

pub use limiter::RateLimiter;

/// What happened to one provider during an enrichment run.
#[derive(Debug)]
pub enum ProviderOutcome {
    /// Column added; `resolved` rows got an address, the rest `None`.
    Enriched { resolved: usize },
    /// Column was already present, provider not called.
    AlreadyPresent,
    /// Provider setup or batch failed; column omitted.
    Failed(GeocodeError),
}

#[derive(Debug)]
pub struct ProviderReport {
    pub provider: &'static str,
    pub outcome: ProviderOutcome,
}

/// Enrich the table with both default providers, Nominatim then ArcGIS.
///
/// Each provider is independent: its own HTTP client, its own rate limiter,
/// and its own fail-soft outcome. A provider failure never aborts the run.
pub fn enrich(table: &mut PlacemarkTable, config: &GeocoderConfig) -> Vec<ProviderReport> {
    let mut reports = Vec::new();

    match NominatimGeocoder::new(config) {
        Ok(provider) => reports.push(run_provider(table, &provider, config)),
        Err(err) => reports.push(init_failure("Nominatim", err)),
    }

    match ArcGisGeocoder::new(config) {
        Ok(provider) => reports.push(run_provider(table, &provider, config)),
        Err(err) => reports.push(init_failure("ArcGIS", err)),
    }

    reports
}

fn init_failure(provider: &'static str, err: GeocodeError) -> ProviderReport {
    error!("failed to initialize {provider}: {err}");
    ProviderReport {
        provider,
        outcome: ProviderOutcome::Failed(err),
    }
}

/// Run one provider over every row. All-or-nothing: an error surviving the
/// retry policy discards the partial column.
pub fn run_provider(
    table: &mut PlacemarkTable,
    provider: &dyn ReverseGeocoder,
    config: &GeocoderConfig,
) -> ProviderReport {
    let name = provider.name();
    let column = PlacemarkTable::location_column_name(name);

    if table.has_location_column(&column) {
        debug!("column {column} already present, skipping {name}");
        return ProviderReport {
            provider: name,
            outcome: ProviderOutcome::AlreadyPresent,
        };
    }

    let mut limiter = RateLimiter::new(Duration::from_secs(config.min_delay_secs));
    let coords = table.coords_for_reverse();
    let mut values = Vec::with_capacity(coords.len());
    let mut resolved = 0;

    for (lat, lon) in coords {
        match reverse_with_retry(provider, &mut limiter, lat, lon, config) {
            Ok(Some(address)) => {
                resolved += 1;
                values.push(Some(address));
            }
            Ok(None) => values.push(None),
            Err(err) => {
                error!("reverse geocoding with {name} failed: {err}");
                return ProviderReport {
                    provider: name,
                    outcome: ProviderOutcome::Failed(err),
                };
            }
        }
    }

    match table.set_location_column(&column, values) {
        Ok(()) => {
            info!(
                "{name}: resolved {resolved}/{} placemarks into {column}",
                table.len()
            );
            ProviderReport {
                provider: name,
                outcome: ProviderOutcome::Enriched { resolved },
            }
        }
        Err(err) => {
            error!("{name}: {err}");
            ProviderReport {
                provider: name,
                outcome: ProviderOutcome::Failed(GeocodeError::Internal(err.to_string())),
            }
        }
    }
}

/// One rate-limited reverse lookup, retrying retriable errors with linear
/// backoff (`retry_backoff_secs * attempt`) up to `max_retries` extra
/// attempts.
fn reverse_with_retry(
    provider: &dyn ReverseGeocoder,
    limiter: &mut RateLimiter,
    lat: f64,
    lon: f64,
    config: &GeocoderConfig,
) -> Result<Option<crate::domain::Address>, GeocodeError> {
    let max_retries = config.max_retries;
    let mut attempt = 0u32;
    loop {
        limiter.wait();
        match provider.reverse(lat, lon) {
            Ok(result) => return Ok(result),
            Err(err) if err.is_retriable() && attempt < max_retries => {
                attempt += 1;
                let wait = Duration::from_secs(config.retry_backoff_secs * u64::from(attempt));
                warn!(
                    "{} returned a retriable error ({err}), retrying in {}s (attempt {attempt}/{max_retries})",
                    provider.name(),
                    wait.as_secs()
                );
                thread::sleep(wait);
            }
            Err(err) => return Err(err),
        }
    }
}
