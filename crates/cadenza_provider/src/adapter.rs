//! Per-action request adapters.
//!
//! One adapter exists per [`ActionKind`]; the processor dispatches on the
//! tag. Adapters are pure: they turn an [`Action`] plus resolved
//! configuration into a [`RequestPayload`] and never perform I/O.

use crate::config::ActionConfig;
use cadenza_core::{Action, ActionKind, RequestPayload};
use cadenza_error::{CadenzaResult, ConfigError};
use serde_json::json;

/// Tagged dispatch over the closed adapter set.
#[derive(Debug, Clone, Copy)]
pub enum RequestAdapter<'a> {
    /// Text-to-speech payload builder.
    Speech(&'a ActionConfig),
    /// Image generation payload builder (b64_json dialect).
    Image(&'a ActionConfig),
}

impl<'a> RequestAdapter<'a> {
    /// Pick the adapter for an action kind.
    pub fn for_kind(kind: ActionKind, config: &'a ActionConfig) -> Self {
        match kind {
            ActionKind::ConvertTextToSpeech => RequestAdapter::Speech(config),
            ActionKind::GenerateImage => RequestAdapter::Image(config),
        }
    }

    /// The model identifier embedded in payloads.
    pub fn model_name(&self) -> &str {
        match self {
            RequestAdapter::Speech(c) | RequestAdapter::Image(c) => &c.model,
        }
    }

    /// The endpoint the payload is posted to.
    pub fn endpoint(&self) -> &str {
        match self {
            RequestAdapter::Speech(c) | RequestAdapter::Image(c) => &c.endpoint,
        }
    }

    /// Build the outbound payload for `action`.
    ///
    /// `user_ref` is the opaque per-user identifier some dialects expect in
    /// the payload; only the image adapter uses it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing required parameters or an
    /// unrecognized aspect ratio. These abort the call before anything is
    /// sent.
    pub fn build_request(&self, action: &Action, user_ref: &str) -> CadenzaResult<RequestPayload> {
        match self {
            RequestAdapter::Speech(config) => build_speech_request(action, config),
            RequestAdapter::Image(config) => build_image_request(action, config, user_ref),
        }
    }
}

fn build_speech_request(action: &Action, config: &ActionConfig) -> CadenzaResult<RequestPayload> {
    let input = action
        .param("input")
        .ok_or_else(|| ConfigError::new("Missing required parameter: input"))?;

    // Action-level overrides win over provider-configured defaults.
    let voice = action
        .param("voice")
        .or_else(|| config.default_value("voice"))
        .unwrap_or("alloy");
    let format = action
        .param("format")
        .or_else(|| config.default_value("format"))
        .unwrap_or("mp3");

    let mut body = json!({
        "model": config.model,
        "voice": voice,
        "input": input,
        "format": format,
    });
    let instructions = action
        .param("instructions")
        .or_else(|| config.default_value("systeminstruction"))
        .filter(|s| !s.is_empty());
    if let Some(instructions) = instructions {
        body["instructions"] = json!(instructions);
    }
    if let Some(speed) = action.param("speed") {
        body["speed"] = json!(speed);
    }

    Ok(RequestPayload::post_json(&config.endpoint, &body))
}

fn build_image_request(
    action: &Action,
    config: &ActionConfig,
    user_ref: &str,
) -> CadenzaResult<RequestPayload> {
    let prompt = action
        .param("prompt")
        .ok_or_else(|| ConfigError::new("Missing required parameter: prompt"))?;
    let ratio = action
        .param("aspect_ratio")
        .ok_or_else(|| ConfigError::new("Missing required parameter: aspect_ratio"))?;

    let body = json!({
        "prompt": prompt,
        "model": config.model,
        // The b64_json dialect only supports one image per request.
        "n": 1,
        "quality": map_quality(action.param("quality").unwrap_or("auto")),
        "size": aspect_ratio_to_size(ratio)?,
        "user": user_ref,
    });

    Ok(RequestPayload::post_json(&config.endpoint, &body))
}

/// Convert an aspect ratio name to the size string the API expects.
///
/// Anything outside the known set is a configuration error, not a runtime
/// one: it aborts request building rather than silently defaulting.
pub fn aspect_ratio_to_size(ratio: &str) -> CadenzaResult<&'static str> {
    match ratio {
        "square" => Ok("1024x1024"),
        "landscape" => Ok("1536x1024"),
        "portrait" => Ok("1024x1536"),
        other => Err(ConfigError::new(format!("Invalid aspect ratio: {}", other)).into()),
    }
}

/// Translate legacy quality tiers into the vocabulary the current dialect
/// speaks. The surrounding system still says `standard`/`hd`; the API now
/// wants `low`/`medium`/`high`.
pub fn map_quality(quality: &str) -> &'static str {
    match quality {
        "standard" => "low",
        "hd" => "high",
        _ => "medium",
    }
}
