pub mod parser;
pub mod reader;

use std::path::PathBuf;
use thiserror::Error;

pub use parser::extract_placemarks;
pub use reader::KmlDocument;

/// Errors from the parsing tier. These are fail-fast: any structural anomaly
/// aborts the whole file, there is no per-record recovery.
#[derive(Debug, Error)]
pub enum KmlError {
    /// Covers missing files and non-UTF-8 content alike.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed KML document")]
    Parse(#[from] roxmltree::Error),

    #[error("placemark {index}: missing <{tag}> element")]
    MissingElement { index: usize, tag: &'static str },

    #[error("placemark {index}: invalid coordinates {text:?}")]
    InvalidCoordinates { index: usize, text: String },
}
