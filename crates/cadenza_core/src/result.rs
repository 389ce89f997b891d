//! The uniform result produced by every pipeline run.

use serde::{Deserialize, Serialize};

/// Successful outcome of a processed action.
///
/// Every success that represents binary output has a strictly positive
/// `filesize` and a non-empty `mimetype`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSuccess {
    /// MIME type of the produced artifact.
    pub mimetype: String,
    /// Filename the artifact was stored under.
    pub filename: String,
    /// Size of the artifact in bytes.
    pub filesize: u64,
    /// Opaque identifier assigned by the artifact store.
    pub artifact_id: String,
    /// Draft-area filename, image actions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_file: Option<String>,
    /// Source URL of the artifact, when the upstream dialect provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Prompt as revised by the upstream model, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Failed outcome of a processed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionFailure {
    /// Numeric error code: upstream HTTP status, 429 for rate limiting,
    /// 400 for configuration errors, 599 for transport failures.
    pub error_code: u32,
    /// Human-readable error message.
    pub error_message: String,
}

impl ActionFailure {
    /// Create a failure.
    pub fn new(error_code: u32, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
        }
    }
}

/// Tagged union over success and failure. Exactly one variant is ever
/// populated; no partial states escape the orchestrator.
///
/// # Examples
///
/// ```
/// use cadenza_core::{ActionFailure, ActionResult};
///
/// let result = ActionResult::Failure(ActionFailure::new(429, "User rate limit exceeded"));
/// assert!(!result.is_success());
/// assert_eq!(result.to_json()["success"], false);
/// assert_eq!(result.to_json()["error_code"], 429);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// The action completed and produced an artifact.
    Success(ActionSuccess),
    /// The action failed at some pipeline stage.
    Failure(ActionFailure),
}

impl ActionResult {
    /// Whether this result is the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// The success payload, if any.
    pub fn as_success(&self) -> Option<&ActionSuccess> {
        match self {
            ActionResult::Success(s) => Some(s),
            ActionResult::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    pub fn as_failure(&self) -> Option<&ActionFailure> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failure(f) => Some(f),
        }
    }

    /// Render the caller-facing record: the variant fields flattened next
    /// to a `success` flag.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ActionResult::Success(s) => {
                let mut value = serde_json::to_value(s).unwrap_or_default();
                value["success"] = serde_json::Value::Bool(true);
                value
            }
            ActionResult::Failure(f) => {
                let mut value = serde_json::to_value(f).unwrap_or_default();
                value["success"] = serde_json::Value::Bool(false);
                value
            }
        }
    }
}

impl From<ActionSuccess> for ActionResult {
    fn from(success: ActionSuccess) -> Self {
        ActionResult::Success(success)
    }
}

impl From<ActionFailure> for ActionResult {
    fn from(failure: ActionFailure) -> Self {
        ActionResult::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_json_carries_flag_and_fields() {
        let result = ActionResult::Success(ActionSuccess {
            mimetype: "audio/mpeg".to_string(),
            filename: "openai-tts-1700000000.mp3".to_string(),
            filesize: 2048,
            artifact_id: "abc".to_string(),
            draft_file: None,
            source_url: None,
            revised_prompt: None,
        });
        let json = result.to_json();
        assert_eq!(json["success"], true);
        assert_eq!(json["mimetype"], "audio/mpeg");
        assert_eq!(json["filesize"], 2048);
        assert!(json.get("draft_file").is_none());
    }

    #[test]
    fn failure_accessors() {
        let result: ActionResult = ActionFailure::new(500, "Internal Server Error").into();
        assert!(!result.is_success());
        assert!(result.as_success().is_none());
        assert_eq!(result.as_failure().unwrap().error_code, 500);
    }
}
