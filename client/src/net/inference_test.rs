use super::*;

use crate::state::project::ReferenceImage;

fn payload(len: usize) -> String {
    "A".repeat(len)
}

fn edit_request() -> EditRequest {
    EditRequest {
        working_image: format!("data:image/jpeg;base64,{}", payload(400)),
        mask: format!("data:image/png;base64,{}", payload(200)),
        prompt: "adicionar um sofá azul".into(),
        references: vec![ReferenceImage {
            id: "r1".into(),
            url: format!("data:image/png;base64,{}", payload(150)),
            name: "Blue Sofa".into(),
            types: Vec::new(),
        }],
    }
}

// --- build_request ---

#[test]
fn request_parts_are_ordered_prompt_image_references_mask() {
    let built = build_request(&edit_request()).unwrap_or_else(|e| panic!("build: {e}"));
    let parts = &built.contents[0].parts;
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0].text.as_deref(), Some("adicionar um sofá azul"));
    assert_eq!(
        parts[1].inline_data.as_ref().map(|d| d.mime_type.as_str()),
        Some("image/jpeg")
    );
    assert_eq!(
        parts[2].inline_data.as_ref().map(|d| d.data.len()),
        Some(150)
    );
    // The mask always travels last.
    assert_eq!(
        parts[3].inline_data.as_ref().map(|d| d.data.len()),
        Some(200)
    );
}

#[test]
fn request_asks_for_image_and_text_modalities() {
    let built = build_request(&edit_request()).unwrap_or_else(|e| panic!("build: {e}"));
    assert_eq!(
        built.generation_config.response_modalities,
        vec!["IMAGE".to_owned(), "TEXT".to_owned()]
    );
}

#[test]
fn tiny_working_image_payload_is_invalid() {
    let mut request = edit_request();
    request.working_image = format!("data:image/png;base64,{}", payload(10));
    assert!(matches!(
        build_request(&request),
        Err(InferenceError::InvalidPayload(_))
    ));
}

#[test]
fn malformed_mask_data_url_is_invalid() {
    let mut request = edit_request();
    request.mask = "garbage".into();
    assert!(matches!(
        build_request(&request),
        Err(InferenceError::InvalidPayload(_))
    ));
}

#[test]
fn invalid_reference_image_is_reported_with_its_name() {
    let mut request = edit_request();
    request.references[0].url = "data:image/png;base64,xx".into();
    match build_request(&request) {
        Err(InferenceError::InvalidPayload(message)) => {
            assert!(message.contains("Blue Sofa"), "message was: {message}");
        }
        other => panic!("expected InvalidPayload, got {other:?}"),
    }
}

#[test]
fn request_without_references_has_three_parts() {
    let mut request = edit_request();
    request.references.clear();
    let built = build_request(&request).unwrap_or_else(|e| panic!("build: {e}"));
    assert_eq!(built.contents[0].parts.len(), 3);
}

// --- parse_response ---

fn response_json(body: &str) -> GenerateResponse {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("parse: {e}"))
}

#[test]
fn response_with_image_and_text_yields_both() {
    let response = response_json(
        r#"{"candidates":[{"content":{"parts":[
            {"text":"done"},
            {"inlineData":{"mimeType":"image/png","data":"SU1H"}}
        ]}}]}"#,
    );
    let outcome = parse_response(response).unwrap_or_else(|e| panic!("parse: {e}"));
    assert_eq!(outcome.mime_type, "image/png");
    assert_eq!(outcome.data, "SU1H");
    assert_eq!(outcome.text.as_deref(), Some("done"));
}

#[test]
fn response_with_image_only_has_no_text() {
    let response = response_json(
        r#"{"candidates":[{"content":{"parts":[
            {"inlineData":{"mimeType":"image/png","data":"SU1H"}}
        ]}}]}"#,
    );
    let outcome = parse_response(response).unwrap_or_else(|e| panic!("parse: {e}"));
    assert!(outcome.text.is_none());
}

#[test]
fn first_image_wins_when_several_are_returned() {
    let response = response_json(
        r#"{"candidates":[{"content":{"parts":[
            {"inlineData":{"mimeType":"image/png","data":"Rk9P"}},
            {"inlineData":{"mimeType":"image/png","data":"QkFS"}}
        ]}}]}"#,
    );
    let outcome = parse_response(response).unwrap_or_else(|e| panic!("parse: {e}"));
    assert_eq!(outcome.data, "Rk9P");
}

#[test]
fn text_only_response_is_a_no_image_failure() {
    let response = response_json(
        r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#,
    );
    assert_eq!(parse_response(response), Err(InferenceError::NoImage));
}

#[test]
fn empty_response_is_a_no_image_failure() {
    assert_eq!(parse_response(response_json("{}")), Err(InferenceError::NoImage));
}

// --- Error surface ---

#[test]
fn failure_modes_have_distinct_messages() {
    let messages = [
        InferenceError::InvalidPayload("mask".into()).to_string(),
        InferenceError::Rejected { status: 400, message: "bad".into() }.to_string(),
        InferenceError::Transport("offline".into()).to_string(),
        InferenceError::NoImage.to_string(),
        InferenceError::MissingApiKey.to_string(),
    ];
    for (i, a) in messages.iter().enumerate() {
        for b in messages.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
