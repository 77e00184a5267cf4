//! Editing-session state and the generation orchestration rules.
//!
//! One `EditorSession` exists per open project. It owns everything scoped to
//! the editing view: the prompt, attached reference images, the active
//! version pointer, the in-flight/loading flag, and the error banner text.
//!
//! Generation is split so the rules stay testable without a browser:
//! [`EditorSession::begin_generation`] validates and assembles the request,
//! the async shell performs the call, and
//! [`EditorSession::finish_generation`] applies the outcome. Exactly one
//! generation can be in flight; the loading flag both drives the UI's
//! disabled state and enforces the single-flight rule here.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use canvas::mask::MaskError;
use thiserror::Error;

use crate::net::inference::InferenceError;
use crate::net::types::EditOutcome;
use crate::state::project::{ActiveVersion, Project, ReferenceImage};
use crate::util::data_url;

/// Why a generation request was refused before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No working image exists to edit.
    #[error("Please upload an image first.")]
    NoWorkingImage,
    /// The prompt is empty after trimming.
    #[error("Please provide a prompt.")]
    EmptyPrompt,
    /// The mask overlay could not be read or serialized.
    #[error("Could not get mask data from canvas.")]
    MaskUnavailable,
    /// A generation is already in flight.
    #[error("A generation is already running.")]
    AlreadyRunning,
}

/// Everything one edit call needs, assembled and validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    /// The image being edited, as a data URL.
    pub working_image: String,
    /// The serialized mask, as a PNG data URL at the working image's
    /// canvas dimensions.
    pub mask: String,
    /// Trimmed, non-empty prompt text.
    pub prompt: String,
    /// Reference images forwarded as hints.
    pub references: Vec<ReferenceImage>,
}

/// Effects the host must apply after a generation settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettledEdit {
    /// True only on success: the consumed mask should be wiped. On failure
    /// the mask is preserved so the user can retry without redrawing.
    pub clear_mask: bool,
}

/// Per-project editing state.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    /// Which version is displayed and used as the next edit's input.
    pub active: ActiveVersion,
    /// Prompt text in the left sidebar.
    pub prompt: String,
    /// Reference images attached to this session.
    pub references: Vec<ReferenceImage>,
    /// A generation call is in flight; re-submission is disabled.
    pub loading: bool,
    /// Text for the error banner near the canvas, if any.
    pub error: Option<String>,
}

impl EditorSession {
    /// Start a session on a project, pointing at its most recent state.
    #[must_use]
    pub fn for_project(project: &Project) -> Self {
        Self { active: project.latest(), ..Self::default() }
    }

    /// The image the next edit applies to: the active version's image.
    #[must_use]
    pub fn working_image<'a>(&self, project: &'a Project) -> Option<&'a str> {
        project
            .image_at(self.active)
            .or(project.base_image.as_deref())
    }

    /// Validate and assemble a generation request.
    ///
    /// On success the session is marked loading and any prior error is
    /// cleared. On failure nothing is sent, the session is not marked
    /// loading, and the validation message lands in the error banner.
    ///
    /// # Errors
    ///
    /// A [`ValidationError`] describing the first failed precondition.
    pub fn begin_generation(
        &mut self,
        project: &Project,
        prompt: &str,
        references: Vec<ReferenceImage>,
        mask_png: Result<Vec<u8>, MaskError>,
    ) -> Result<EditRequest, ValidationError> {
        let result = self.validate(project, prompt, references, mask_png);
        match &result {
            Ok(_) => {
                self.loading = true;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        result
    }

    fn validate(
        &self,
        project: &Project,
        prompt: &str,
        references: Vec<ReferenceImage>,
        mask_png: Result<Vec<u8>, MaskError>,
    ) -> Result<EditRequest, ValidationError> {
        if self.loading {
            return Err(ValidationError::AlreadyRunning);
        }
        let working_image = self
            .working_image(project)
            .ok_or(ValidationError::NoWorkingImage)?
            .to_owned();
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        let mask = mask_png.map_err(|_| ValidationError::MaskUnavailable)?;
        Ok(EditRequest {
            working_image,
            mask: data_url::encode_png(&mask),
            prompt: prompt.to_owned(),
            references,
        })
    }

    /// Apply a settled generation call.
    ///
    /// Success appends the returned image to the project history, moves the
    /// active pointer to it, and clears the prompt; the caller then wipes
    /// the mask. Failure leaves project and mask untouched and surfaces the
    /// error. The loading flag clears on both paths.
    pub fn finish_generation(
        &mut self,
        project: &mut Project,
        outcome: Result<EditOutcome, InferenceError>,
    ) -> SettledEdit {
        self.loading = false;
        match outcome {
            Ok(outcome) => {
                if let Some(text) = &outcome.text {
                    log::info!("model text response: {text}");
                }
                let image = data_url::from_base64(&outcome.mime_type, &outcome.data);
                self.active = project.append_version(image);
                self.prompt.clear();
                self.error = None;
                SettledEdit { clear_mask: true }
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SettledEdit { clear_mask: false }
            }
        }
    }

    /// Point the view at an existing version. Returns false (and changes
    /// nothing) if the version doesn't exist on this project.
    pub fn select_version(&mut self, project: &Project, version: ActiveVersion) -> bool {
        if project.has_version(version) {
            self.active = version;
            true
        } else {
            false
        }
    }

    /// A new base image was uploaded: reset project progress and all
    /// session inputs scoped to the old image.
    pub fn load_base_image(&mut self, project: &mut Project, image: String) {
        project.set_base_image(image);
        self.active = ActiveVersion::Original;
        self.references.clear();
        self.error = None;
    }

    /// Attach a reference image to the session.
    pub fn add_reference(&mut self, reference: ReferenceImage) {
        self.references.push(reference);
    }

    /// Dismiss the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

// ── Prompt slash-command autocomplete ───────────────────────────
//
// Typing "/" in the prompt filters the session's reference images by name;
// accepting one splices the name over the token. Plain substring matching
// over the text around the cursor.

/// A `/query` token found immediately before the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashToken {
    /// Byte offset of the `/` in the prompt text.
    pub start: usize,
    /// The query typed after the slash (may be empty).
    pub query: String,
}

/// Find a slash token ending at the cursor, if the cursor sits inside one.
///
/// The slash must begin the prompt or follow whitespace, and the token may
/// not itself contain whitespace.
#[must_use]
pub fn slash_token_at(text: &str, cursor: usize) -> Option<SlashToken> {
    let head = text.get(..cursor)?;
    let start = head.rfind('/')?;
    if start > 0 {
        let before = head[..start].chars().next_back()?;
        if !before.is_whitespace() {
            return None;
        }
    }
    let query = &head[start + 1..];
    if query.contains(char::is_whitespace) {
        return None;
    }
    Some(SlashToken { start, query: query.to_owned() })
}

/// Reference images whose names match the query, case-insensitively.
#[must_use]
pub fn matching_references<'a>(
    references: &'a [ReferenceImage],
    query: &str,
) -> Vec<&'a ReferenceImage> {
    let needle = query.to_lowercase();
    references
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .collect()
}

/// Splice a chosen reference name over the slash token. Returns the new
/// prompt text and the new cursor position (just after the inserted name).
#[must_use]
pub fn apply_completion(
    text: &str,
    token: &SlashToken,
    cursor: usize,
    name: &str,
) -> (String, usize) {
    let mut result = String::with_capacity(text.len() + name.len());
    result.push_str(&text[..token.start]);
    result.push_str(name);
    result.push_str(text.get(cursor..).unwrap_or_default());
    (result, token.start + name.len())
}
