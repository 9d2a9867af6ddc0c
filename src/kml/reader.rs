use super::KmlError;
use roxmltree::Document;
use std::fs;
use std::path::Path;

/// A loaded, sanitized KML file, ready to be parsed into an XML tree.
///
/// The saved-places exports this crate targets prefix their extended-data
/// elements with `mwm:`, and the prefix is not reliably declared as a
/// namespace. The sanitizer rewrites `mwm:` to `mwm_` so the document parses
/// as plain element names like `mwm_featureTypes`. An `xmlns:mwm`
/// declaration is not touched (its colon comes before `mwm`) and simply
/// declares a namespace nothing references anymore.
#[derive(Debug, Clone)]
pub struct KmlDocument {
    text: String,
}

impl KmlDocument {
    /// Read a UTF-8 KML file from disk. Fails on missing files and on
    /// content that is not valid UTF-8.
    pub fn from_file(path: &Path) -> Result<Self, KmlError> {
        let raw = fs::read_to_string(path).map_err(|source| KmlError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(raw))
    }

    pub fn from_text(raw: impl Into<String>) -> Self {
        let text = raw.into().replace("mwm:", "mwm_");
        Self { text }
    }

    /// Parse the sanitized text into an XML tree. Malformed markup
    /// propagates as `KmlError::Parse`.
    pub fn parse(&self) -> Result<Document<'_>, KmlError> {
        Ok(Document::parse(&self.text)?)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
