pub mod arcgis;
pub mod nominatim;

use crate::domain::Address;
use thiserror::Error;

pub use arcgis::ArcGisGeocoder;
pub use nominatim::NominatimGeocoder;

/// A reverse-geocoding provider.
///
/// `Ok(None)` means the provider answered and had no address for the
/// coordinates; errors are transport or protocol failures.
pub trait ReverseGeocoder {
    /// Short provider name, used to derive the table column
    /// (`location_{name}`).
    fn name(&self) -> &'static str;

    fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Address>, GeocodeError>;
}

/// Errors from the enrichment tier. The enricher catches these per provider;
/// they never abort the pipeline.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("failed to create HTTP client: {0}")]
    Init(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("provider returned HTTP status {0}")]
    Status(u16),

    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("failed to parse provider response: {0}")]
    InvalidResponse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GeocodeError {
    /// Whether a retry can reasonably succeed: transient transport failures
    /// and throttling/gateway statuses only.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(code) => matches!(*code, 429 | 503 | 504),
            _ => false,
        }
    }
}
