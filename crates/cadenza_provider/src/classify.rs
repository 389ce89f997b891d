//! Response classification.
//!
//! Turns an arbitrary HTTP outcome into the closed set of success/error
//! shapes. The speech dialect returns raw audio bytes with a `Content-Type`
//! header; the image dialect returns JSON with a base64 payload and never
//! relies on headers.

use crate::transport::HttpResponse;
use base64::Engine as _;
use cadenza_core::ActionFailure;
use tracing::{debug, error};

/// Decoded audio output ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    /// MIME type, from the header when present, else from the requested
    /// format.
    pub mimetype: String,
    /// Filename extension consistent with the mimetype, else the
    /// lower-cased requested format.
    pub extension: String,
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
}

/// Decoded image output ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    /// Decoded image bytes.
    pub bytes: Vec<u8>,
    /// Output format reported by the API, e.g. `png`.
    pub output_format: String,
}

/// MIME type for a requested audio format.
pub fn mimetype_for_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "mp3" => "audio/mp3",
        "opus" => "audio/opus",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "pcm" => "audio/vnd.wave",
        _ => "application/octet-stream",
    }
}

/// Filename extension for an audio MIME type, reversing the format table.
pub fn extension_for_mimetype(mimetype: &str) -> Option<&'static str> {
    match mimetype.to_lowercase().as_str() {
        "audio/mp3" | "audio/mpeg" => Some("mp3"),
        "audio/opus" => Some("opus"),
        "audio/aac" => Some("aac"),
        "audio/flac" => Some("flac"),
        "audio/wav" => Some("wav"),
        "audio/vnd.wave" => Some("wav"),
        _ => None,
    }
}

/// Reason phrases for 5xx statuses often returned with empty bodies.
pub fn status_phrase(status: u16) -> Option<&'static str> {
    match status {
        500 => Some("Internal Server Error"),
        501 => Some("Not Implemented"),
        502 => Some("Bad Gateway"),
        503 => Some("Service Unavailable"),
        504 => Some("Gateway Timeout"),
        _ => None,
    }
}

/// Classify a non-success response into a failure.
///
/// Empty bodies fall back to the phrase table; otherwise the structured
/// `error.message` field is extracted when present, else the raw body text
/// is used.
pub fn classify_error(response: &HttpResponse) -> ActionFailure {
    let status = response.status;
    let body = response.body_text();

    let message = if body.trim().is_empty() {
        status_phrase(status).unwrap_or("Unknown error").to_string()
    } else {
        extract_error_message(&body).unwrap_or(body)
    };

    error!(status, message = %message, "Upstream API returned an error");
    ActionFailure::new(status as u32, message)
}

/// Pull the nested `error.message` field out of a structured error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Classify a speech response.
///
/// A 2xx response with an empty body is rejected as a 502 failure, so a
/// success never carries zero bytes into persistence.
///
/// On success, the mimetype comes from a non-empty `Content-Type` header
/// when present (the header is authoritative), falling back to the
/// requested format through the fixed table; the extension reverses that
/// table, else falls back to the lower-cased requested format.
pub fn classify_audio(
    response: &HttpResponse,
    requested_format: &str,
) -> Result<AudioPayload, ActionFailure> {
    if !response.is_success() {
        return Err(classify_error(response));
    }
    // A success with no bytes has nothing to persist; treat it as an
    // upstream fault rather than producing a zero-size artifact.
    if response.body.is_empty() {
        error!(status = response.status, "Audio response body is empty");
        return Err(ActionFailure::new(502, "Empty response body"));
    }

    let mimetype = match response.header("Content-Type") {
        Some(header) if !header.is_empty() => header.to_string(),
        _ => mimetype_for_format(requested_format).to_string(),
    };
    let extension = extension_for_mimetype(&mimetype)
        .map(str::to_string)
        .unwrap_or_else(|| requested_format.to_lowercase());

    debug!(mimetype = %mimetype, size = response.body.len(), "Classified audio response");
    Ok(AudioPayload {
        mimetype,
        extension,
        bytes: response.body.clone(),
    })
}

/// Classify a b64_json image response.
///
/// Success means decoding `data[0].b64_json` plus the `output_format`
/// field from the JSON body; `Content-Type` is never inspected for this
/// dialect. A 2xx response whose body does not carry those fields is
/// reported as a 502 failure.
pub fn classify_image(response: &HttpResponse) -> Result<ImagePayload, ActionFailure> {
    if !response.is_success() {
        return Err(classify_error(response));
    }

    let body: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
        error!(error = %e, "Image response body is not valid JSON");
        ActionFailure::new(502, format!("Failed to parse image response: {}", e))
    })?;

    let b64_data = body
        .get("data")
        .and_then(|d| d.get(0))
        .and_then(|item| item.get("b64_json"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            error!("Image response is missing data[0].b64_json");
            ActionFailure::new(502, "Image response is missing data[0].b64_json".to_string())
        })?;
    let output_format = body
        .get("output_format")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            error!("Image response is missing output_format");
            ActionFailure::new(502, "Image response is missing output_format".to_string())
        })?
        .to_string();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64_data)
        .map_err(|e| {
            error!(error = %e, "Image payload is not valid base64");
            ActionFailure::new(502, format!("Failed to decode image payload: {}", e))
        })?;

    debug!(output_format = %output_format, size = bytes.len(), "Classified image response");
    Ok(ImagePayload {
        bytes,
        output_format,
    })
}
