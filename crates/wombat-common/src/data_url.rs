//! Inline `data:` URL decoding.
//!
//! [RFC 2397 The "data" URL scheme](https://www.rfc-editor.org/rfc/rfc2397)
//!
//! "data:[<mediatype>][;base64],<data>"

use base64::Engine;
use thiserror::Error;

/// Errors raised while decoding a `data:` URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    /// The URL does not start with `data:`.
    #[error("not a data URL")]
    NotDataUrl,
    /// The `,` separating metadata from payload is missing.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// The base64 payload could not be decoded.
    #[error("base64 decode error: {0}")]
    Base64(String),
    /// A `%` escape is not followed by two hex digits.
    #[error("invalid percent escape at byte {0}")]
    PercentEscape(usize),
}

/// A parsed `data:` URL that can be decoded into raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type and parameters between `data:` and the comma.
    pub metadata: &'a str,
    /// Encoded payload after the comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a raw `data:` URL into metadata and payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme or the comma is missing.
    pub fn parse(raw: &'a str) -> Result<Self, DataUrlError> {
        let rest = raw.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
        let (metadata, payload) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;
        Ok(Self { metadata, payload })
    }

    /// The media type, defaulting to `text/plain` as RFC 2397 prescribes.
    #[must_use]
    pub fn media_type(&self) -> &'a str {
        let media = self.metadata.split(';').next().unwrap_or_default();
        if media.is_empty() { "text/plain" } else { media }
    }

    /// Decode the payload into raw bytes.
    ///
    /// Base64 payloads are decoded as such (whitespace ignored); anything else
    /// is percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload encoding is invalid.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        if self.metadata.ends_with(";base64") {
            let compact: String = self.payload.split_ascii_whitespace().collect();
            base64::engine::general_purpose::STANDARD
                .decode(compact)
                .map_err(|e| DataUrlError::Base64(e.to_string()))
        } else {
            percent_decode(self.payload)
        }
    }
}

/// Decode `%XX` escapes, passing every other byte through.
fn percent_decode(input: &str) -> Result<Vec<u8>, DataUrlError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input
                .get(i + 1..i + 3)
                .ok_or(DataUrlError::PercentEscape(i))?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| DataUrlError::PercentEscape(i))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}
