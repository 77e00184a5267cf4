//! Data-URL helpers for embedded raster payloads.
//!
//! Images travel through the editor as `data:<mime>;base64,<payload>`
//! strings: project history entries, reference images, and the serialized
//! mask all use this addressable form.

#[cfg(test)]
#[path = "data_url_test.rs"]
mod data_url_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// MIME type used for everything the editor encodes itself.
pub const PNG_MIME: &str = "image/png";

/// Errors from taking a data URL apart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    /// The string has no `comma`-separated payload section.
    #[error("not a data URL: missing payload")]
    MissingPayload,
}

/// Encode raw bytes as a data URL.
#[must_use]
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encode PNG bytes as a data URL.
#[must_use]
pub fn encode_png(bytes: &[u8]) -> String {
    encode(PNG_MIME, bytes)
}

/// Wrap an already-base64 payload as a data URL.
#[must_use]
pub fn from_base64(mime: &str, data: &str) -> String {
    format!("data:{mime};base64,{data}")
}

/// Split a data URL into `(mime_type, base64_payload)`.
///
/// A missing or unparseable MIME section falls back to [`PNG_MIME`]; only a
/// missing payload is an error.
///
/// # Errors
///
/// [`DataUrlError::MissingPayload`] when the string has no `,` separator.
pub fn split(data_url: &str) -> Result<(String, String), DataUrlError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or(DataUrlError::MissingPayload)?;
    let mime = header
        .strip_prefix("data:")
        .and_then(|h| h.split(';').next())
        .filter(|m| !m.is_empty())
        .unwrap_or(PNG_MIME);
    Ok((mime.to_owned(), payload.to_owned()))
}
