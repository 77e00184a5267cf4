//! Wire types for the external image-generation collaborator.
//!
//! The service takes an ordered list of parts (text and inline raster data)
//! and answers with candidates whose parts carry at most one generated image
//! and optional descriptive text. These shapes are serialization-only; the
//! editor's own state never stores them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Base64-encoded raster payload with its MIME type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One part of a request or response: text or inline raster data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    /// An inline raster part.
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
            ..Self::default()
        }
    }
}

/// Ordered parts of one message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Generation options. The editor always asks for image plus text output.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

/// A full generation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One response candidate.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

/// A full generation response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// What a successful edit call yields: exactly one generated image and
/// optional descriptive text (informational only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// MIME type of the generated raster.
    pub mime_type: String,
    /// Base64-encoded raster payload.
    pub data: String,
    /// Accompanying model text, if any.
    pub text: Option<String>,
}
