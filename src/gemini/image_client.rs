use crate::{
    composer::ComposedPrompt,
    config::GeminiConfig,
    error::{Result, TryOnError},
    models::{
        image::{
            ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse,
            GenerationConfig, InlineData, Part,
        },
        GarmentImage, GeneratedImage,
    },
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, StatusCode};

use super::GenerationClient;

pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API Key. Please check your configuration.";

/// Gemini `generateContent` client asking for image-only output.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Fails before any request can be made when no API key is configured.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TryOnError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn redact(&self, text: &str) -> String {
        text.replace(&self.api_key, "[redacted]")
    }
}

/// Request body: image parts in order, then the prompt text.
pub fn build_request(prompt: &ComposedPrompt) -> GenerateContentRequest {
    let mut parts: Vec<Part> = prompt
        .ordered_image_parts
        .iter()
        .map(|image: &GarmentImage| Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.to_base64(),
            },
        })
        .collect();
    parts.push(Part::Text {
        text: prompt.prompt_text.clone(),
    });

    GenerateContentRequest {
        contents: vec![Content { role: None, parts }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
        },
    }
}

/// Decodes a successful reply. A body that arrived but cannot be read as a
/// response is a generation failure, not a transport one.
pub fn parse_response(body: &[u8]) -> Result<GenerateContentResponse> {
    serde_json::from_slice(body).map_err(|e| {
        TryOnError::GenerationFailure(format!("Unreadable Gemini response: {}", e))
    })
}

/// First inline image of the first candidate.
pub fn extract_image(response: GenerateContentResponse, model: &str) -> Result<GeneratedImage> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(TryOnError::GenerationFailure(format!(
            "Prompt blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| TryOnError::GenerationFailure("No candidates in the API response.".into()))?;
    let finish_reason = candidate.finish_reason.clone();

    let inline = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .find_map(|part| match part {
            Part::InlineData { inline_data } => Some(inline_data),
            Part::Text { .. } | Part::Other(_) => None,
        })
        .ok_or_else(|| {
            TryOnError::GenerationFailure(format!(
                "No image data found in the API response (finish reason: {}).",
                finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

    let data = general_purpose::STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| TryOnError::GenerationFailure(format!("Image data is not valid base64: {}", e)))?;

    Ok(GeneratedImage {
        data,
        mime_type: inline.mime_type,
        model: model.to_string(),
    })
}

/// Maps a non-success HTTP reply to an error. Key problems are configuration
/// errors; everything else is a transport failure.
pub fn classify_http_error(status: StatusCode, body: &str) -> TryOnError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.chars().take(500).collect());

    let mentions_key = message.contains("API_KEY") || message.to_lowercase().contains("api key");
    if mentions_key
        && matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        )
    {
        return TryOnError::Config(INVALID_API_KEY_MESSAGE.into());
    }

    TryOnError::Transport(format!("Gemini returned {}: {}", status, message))
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: ComposedPrompt) -> Result<GeneratedImage> {
        let body = build_request(&prompt);
        let payload_bytes: usize = prompt.ordered_image_parts.iter().map(GarmentImage::len).sum();

        log::info!("Generating image with model: {}", self.model);
        log::debug!(
            "Request has {} image part(s), {} payload bytes, {} prompt chars",
            prompt.part_count(),
            payload_bytes,
            prompt.prompt_text.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let detail = self.redact(&e.to_string());
                log::error!(
                    "Gemini request failed to send: {} (timeout={}, connect={})",
                    detail,
                    e.is_timeout(),
                    e.is_connect()
                );
                TryOnError::Transport(detail)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::error!("Gemini API error: status={}, body={}", status, self.redact(&text));
            return Err(classify_http_error(status, &text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TryOnError::Transport(self.redact(&e.to_string())))?;

        extract_image(parse_response(&body)?, &self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::SceneClass;
    use serde_json::json;

    fn composed() -> ComposedPrompt {
        ComposedPrompt {
            ordered_image_parts: vec![
                GarmentImage::new(b"ref".to_vec(), "image/jpeg"),
                GarmentImage::new(b"coat".to_vec(), "image/png"),
            ],
            prompt_text: "make it so".into(),
            scene_class: SceneClass::Winter,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request(&composed())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "cmVm" } },
                        { "inlineData": { "mimeType": "image/png", "data": "Y29hdA==" } },
                        { "text": "make it so" }
                    ]
                }],
                "generationConfig": { "responseModalities": ["IMAGE"] }
            })
        );
    }

    #[test]
    fn test_extracts_first_inline_image() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": "AQID" } },
                    { "inlineData": { "mimeType": "image/png", "data": "BAUG" } }
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let image = extract_image(response, "gemini-2.5-flash-image").unwrap();
        assert_eq!(image.data, vec![1, 2, 3]);
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.model, "gemini-2.5-flash-image");
    }

    #[test]
    fn test_text_only_response_is_generation_failure() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't help with that." }] },
                "finishReason": "IMAGE_SAFETY"
            }]
        }))
        .unwrap();

        match extract_image(response, "m").unwrap_err() {
            TryOnError::GenerationFailure(msg) => assert!(msg.contains("IMAGE_SAFETY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_part_kinds_are_skipped() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "executableCode": { "language": "PYTHON", "code": "print(1)" } },
                    { "inlineData": { "mimeType": "image/png", "data": "aW1n" } }
                ]},
                "finishReason": "STOP"
            }]
        })
        .to_string();

        let response = parse_response(body.as_bytes()).unwrap();
        let parts = &response.candidates[0].content.as_ref().unwrap().parts;
        assert!(matches!(parts[0], Part::Other(_)));
        assert_eq!(extract_image(response, "m").unwrap().data, b"img");
    }

    #[test]
    fn test_unreadable_success_body_is_generation_failure() {
        for body in [&b"<html>oops</html>"[..], &br#"{"candidates": "nope"}"#[..]] {
            let err = parse_response(body).unwrap_err();
            assert!(matches!(err, TryOnError::GenerationFailure(_)), "{err:?}");
            assert_eq!(err.user_message(), crate::error::GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_blocked_prompt_and_empty_candidates() {
        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(
            extract_image(blocked, "m"),
            Err(TryOnError::GenerationFailure(_))
        ));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_image(empty, "m"),
            Err(TryOnError::GenerationFailure(_))
        ));
    }

    #[test]
    fn test_invalid_key_is_configuration_error() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })
        .to_string();
        match classify_http_error(StatusCode::BAD_REQUEST, &body) {
            TryOnError::Config(msg) => assert_eq!(msg, INVALID_API_KEY_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_statuses_are_transport_errors() {
        let err = classify_http_error(StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded");
        match err {
            TryOnError::Transport(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_client_requires_key() {
        let err = GeminiClient::new(&GeminiConfig::new()).err().unwrap();
        assert!(matches!(err, TryOnError::Config(_)));

        let client = GeminiClient::new(
            &GeminiConfig::new()
                .with_api_key("k")
                .with_base_url("http://localhost:9999/v1beta/"),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }
}
