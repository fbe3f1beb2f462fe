use serde_json::Value;
use shared::PredictionResult;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::WorkflowConfig;
use crate::error::PredictionError;
use crate::image::ImageReference;

pub const UPLOAD_FIELD: &str = "file";
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";
pub const ACCEPT_JSON: &str = "application/json";

const MAX_ERROR_MESSAGE_LEN: usize = 200;

/// A single-part multipart upload, independent of the HTTP client that
/// eventually sends it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub endpoint: Url,
    pub field_name: &'static str,
    pub file_name: String,
    pub content_type: &'static str,
    pub accept: &'static str,
    pub bytes: Arc<[u8]>,
    pub timeout: Duration,
}

impl UploadRequest {
    pub fn for_image(config: &WorkflowConfig, image: &ImageReference) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            field_name: UPLOAD_FIELD,
            file_name: image.file_name().to_string(),
            content_type: UPLOAD_CONTENT_TYPE,
            accept: ACCEPT_JSON,
            bytes: image.shared_bytes(),
            timeout: config.timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_response(response: &RawResponse) -> Result<PredictionResult, PredictionError> {
    if !response.is_success() {
        return Err(PredictionError::Http {
            status: response.status,
            message: server_message(&response.body),
        });
    }

    let payload: Value = serde_json::from_str(&response.body)
        .map_err(|e| PredictionError::Malformed(format!("body is not JSON ({e})")))?;
    let fields = payload
        .as_object()
        .ok_or_else(|| PredictionError::Malformed("expected a JSON object".into()))?;

    let class = fields
        .get("class")
        .and_then(Value::as_str)
        .filter(|class| !class.trim().is_empty())
        .ok_or_else(|| PredictionError::Malformed("missing `class` label".into()))?;

    let confidence = match fields.get("confidence") {
        Some(Value::String(raw)) => raw.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => return Err(PredictionError::Malformed("missing `confidence`".into())),
    };
    match confidence.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => {}
        _ => {
            return Err(PredictionError::Malformed(format!(
                "confidence `{confidence}` is not a probability"
            )));
        }
    }

    Ok(PredictionResult::new(class, confidence))
}

/// Best human-readable explanation in an error body: FastAPI's `detail`, a
/// generic `error` field, or the raw text.
fn server_message(body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(message) = fields.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let text = body.trim();
    if text.is_empty() {
        "no response body".to_string()
    } else if text.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = text.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(body: &str) -> String {
        match parse_response(&RawResponse::new(200, body)) {
            Err(PredictionError::Malformed(reason)) => reason,
            other => panic!("expected malformed for {body:?}, got {other:?}"),
        }
    }

    #[test]
    fn builds_single_file_part() {
        let config = WorkflowConfig::new("https://leaf.example.org/predict").unwrap();
        let image = ImageReference::new(vec![7, 8, 9], "leaf.png", "image/png");

        let request = UploadRequest::for_image(&config, &image);
        assert_eq!(request.endpoint.as_str(), "https://leaf.example.org/predict");
        assert_eq!(request.field_name, "file");
        assert_eq!(request.file_name, "leaf.png");
        assert_eq!(request.content_type, "image/jpeg");
        assert_eq!(request.accept, "application/json");
        assert_eq!(&request.bytes[..], image.bytes());
        assert_eq!(request.timeout, config.timeout());
    }

    #[test]
    fn success_body_is_stored_verbatim() {
        let result = parse_response(&RawResponse::new(
            200,
            r#"{"class":"Septoria_leaf_spot","confidence":"0.99871"}"#,
        ))
        .unwrap();
        assert_eq!(result, PredictionResult::new("Septoria_leaf_spot", "0.99871"));
    }

    #[test]
    fn unknown_label_is_not_an_error() {
        let result =
            parse_response(&RawResponse::new(201, r#"{"class":"Late_blight","confidence":"0.4"}"#))
                .unwrap();
        assert_eq!(result.class, "Late_blight");
    }

    #[test]
    fn numeric_confidence_is_accepted() {
        let result =
            parse_response(&RawResponse::new(200, r#"{"class":"Healthy","confidence":0.5}"#))
                .unwrap();
        assert_eq!(result.confidence, "0.5");
    }

    #[test]
    fn rejects_incomplete_payloads() {
        assert!(malformed("<html>oops</html>").contains("not JSON"));
        assert!(malformed("[1, 2]").contains("JSON object"));
        assert!(malformed(r#"{"confidence":"0.5"}"#).contains("class"));
        assert!(malformed(r#"{"class":"","confidence":"0.5"}"#).contains("class"));
        assert!(malformed(r#"{"class":"Healthy"}"#).contains("confidence"));
        assert!(malformed(r#"{"class":"Healthy","confidence":"high"}"#).contains("probability"));
        assert!(malformed(r#"{"class":"Healthy","confidence":"1.5"}"#).contains("probability"));
        assert!(malformed(r#"{"class":"Healthy","confidence":"-0.1"}"#).contains("probability"));
    }

    #[test]
    fn http_errors_carry_server_message() {
        let cases = [
            (422, r#"{"detail":"Field required"}"#, "Field required"),
            (500, r#"{"error":"model crashed"}"#, "model crashed"),
            (502, "Bad Gateway", "Bad Gateway"),
            (503, "   ", "no response body"),
        ];
        for (status, body, message) in cases {
            assert_eq!(
                parse_response(&RawResponse::new(status, body)),
                Err(PredictionError::Http {
                    status,
                    message: message.to_string()
                })
            );
        }
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        match parse_response(&RawResponse::new(500, body)) {
            Err(PredictionError::Http { message, .. }) => {
                assert_eq!(message.len(), MAX_ERROR_MESSAGE_LEN + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
