//! The edit call to the external image-generation service.
//!
//! Request assembly and response interpretation are plain functions so they
//! can be tested natively; only [`edit_image_with_mask`] performs I/O, via
//! `gloo-net` in the browser. Every failure mode the editor must surface
//! distinctly gets its own [`InferenceError`] variant, and nothing here is
//! allowed to escape past the session orchestrator uncaught.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "inference_test.rs"]
mod inference_test;

use thiserror::Error;

use crate::net::types::{
    Content, EditOutcome, GenerateRequest, GenerateResponse, GenerationConfig, Part,
};
use crate::state::session::EditRequest;
use crate::util::data_url;

/// Model identifier on the generation service.
const MODEL: &str = "gemini-2.5-flash-image-preview";

/// Inline payloads smaller than this can't be a real image; reject them
/// before burning a service call.
const MIN_INLINE_PAYLOAD: usize = 100;

/// API key baked in at build time, mirroring the deployment's env config.
const API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

/// Failure modes of one edit call, each surfaced distinctly to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The working image, mask, or a reference image is not a usable
    /// payload. Caught locally, before any network traffic.
    #[error("Image payload is invalid: {0}")]
    InvalidPayload(String),
    /// The service refused the request shape.
    #[error("The service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The call never completed (network failure, unreadable response).
    #[error("The generation request failed: {0}")]
    Transport(String),
    /// The call succeeded transport-wise but returned no image. Hard
    /// failure: the editor has nothing to append.
    #[error("The service did not return an image.")]
    NoImage,
    /// No API key was configured at build time.
    #[error("GEMINI_API_KEY is not set; image generation is unavailable.")]
    MissingApiKey,
}

/// Assemble the ordered request parts: prompt text, working image,
/// reference images, and the mask last. Mask and working image travel at
/// identical pixel dimensions; the service aligns them pixel-for-pixel.
///
/// # Errors
///
/// [`InferenceError::InvalidPayload`] if any data URL is malformed or
/// implausibly small.
pub fn build_request(request: &EditRequest) -> Result<GenerateRequest, InferenceError> {
    let working = inline_part(&request.working_image, "working image")?;
    let mask = inline_part(&request.mask, "mask")?;

    let mut parts = vec![Part::text(request.prompt.clone()), working];
    for reference in &request.references {
        parts.push(inline_part(&reference.url, &reference.name)?);
    }
    parts.push(mask);

    Ok(GenerateRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_owned(), "TEXT".to_owned()],
        },
    })
}

fn inline_part(data_url: &str, label: &str) -> Result<Part, InferenceError> {
    let (mime, payload) = data_url::split(data_url)
        .map_err(|e| InferenceError::InvalidPayload(format!("{label}: {e}")))?;
    if payload.len() < MIN_INLINE_PAYLOAD {
        return Err(InferenceError::InvalidPayload(format!(
            "{label}: payload too small to be an image"
        )));
    }
    Ok(Part::inline(mime, payload))
}

/// Interpret a response: the first candidate's parts must contain exactly
/// one image; any text parts are informational.
///
/// # Errors
///
/// [`InferenceError::NoImage`] when no candidate part carries raster data.
pub fn parse_response(response: GenerateResponse) -> Result<EditOutcome, InferenceError> {
    let mut image = None;
    let mut text = None;

    if let Some(candidate) = response.candidates.into_iter().next() {
        for part in candidate.content.parts {
            if let Some(inline) = part.inline_data {
                image.get_or_insert(inline);
            }
            if let Some(t) = part.text {
                text.get_or_insert(t);
            }
        }
    }

    match image {
        Some(inline) => Ok(EditOutcome {
            mime_type: inline.mime_type,
            data: inline.data,
            text,
        }),
        None => Err(InferenceError::NoImage),
    }
}

/// Send one edit request to the generation service and interpret the
/// answer. Browser-only; the native build returns a transport error so
/// logic tests never hit the network.
///
/// # Errors
///
/// Any [`InferenceError`]; never panics and never throws past the caller.
pub async fn edit_image_with_mask(request: &EditRequest) -> Result<EditOutcome, InferenceError> {
    #[cfg(feature = "hydrate")]
    {
        let Some(api_key) = API_KEY else {
            return Err(InferenceError::MissingApiKey);
        };
        let body = build_request(request)?;
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{MODEL}:generateContent?key={api_key}"
        );

        log::info!(
            "submitting edit: prompt {} chars, {} reference image(s)",
            request.prompt.len(),
            request.references.len()
        );

        let response = gloo_net::http::Request::post(&url)
            .json(&body)
            .map_err(|e| InferenceError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "no further detail".to_owned());
            return Err(InferenceError::Rejected { status, message });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;
        parse_response(parsed)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, API_KEY, MODEL);
        Err(InferenceError::Transport(
            "inference is only available in the browser".to_owned(),
        ))
    }
}
