use super::*;

#[test]
fn text_part_serializes_without_inline_data() {
    let json = serde_json::to_value(Part::text("hello")).unwrap_or_default();
    assert_eq!(json.get("text").and_then(|v| v.as_str()), Some("hello"));
    assert!(json.get("inlineData").is_none());
}

#[test]
fn inline_part_uses_camel_case_keys() {
    let json = serde_json::to_value(Part::inline("image/png", "QUJD")).unwrap_or_default();
    let inline = json.get("inlineData").unwrap_or(&serde_json::Value::Null);
    assert_eq!(inline.get("mimeType").and_then(|v| v.as_str()), Some("image/png"));
    assert_eq!(inline.get("data").and_then(|v| v.as_str()), Some("QUJD"));
    assert!(json.get("text").is_none());
}

#[test]
fn request_serializes_generation_config() {
    let request = GenerateRequest {
        contents: vec![Content { parts: vec![Part::text("p")] }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".into(), "TEXT".into()],
        },
    };
    let json = serde_json::to_value(&request).unwrap_or_default();
    let modalities = json
        .pointer("/generationConfig/responseModalities")
        .and_then(|v| v.as_array())
        .map(Vec::len);
    assert_eq!(modalities, Some(2));
}

#[test]
fn response_deserializes_mixed_parts() {
    let json = r#"{
        "candidates": [{
            "content": { "parts": [
                { "text": "described" },
                { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
            ]}
        }]
    }"#;
    let response: GenerateResponse =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("parse: {e}"));
    let parts = &response.candidates[0].content.parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].text.as_deref(), Some("described"));
    assert_eq!(
        parts[1].inline_data.as_ref().map(|d| d.data.as_str()),
        Some("QUJD")
    );
}

#[test]
fn response_tolerates_missing_fields() {
    let response: GenerateResponse =
        serde_json::from_str("{}").unwrap_or_else(|e| panic!("parse: {e}"));
    assert!(response.candidates.is_empty());

    let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[{}]}"#)
        .unwrap_or_else(|e| panic!("parse: {e}"));
    assert!(response.candidates[0].content.parts.is_empty());
}
