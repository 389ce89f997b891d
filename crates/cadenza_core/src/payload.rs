//! Outbound request payload type.

use serde::{Deserialize, Serialize};

/// Provider-specific wire representation of one outbound call.
///
/// Built by a request adapter from an [`Action`](crate::Action); the
/// orchestrator treats it as opaque beyond "sendable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    /// HTTP method, e.g. "POST".
    pub method: String,
    /// Fully resolved endpoint URI.
    pub uri: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RequestPayload {
    /// Build a `POST` payload with a JSON body and `Content-Type` header.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_core::RequestPayload;
    /// use serde_json::json;
    ///
    /// let payload = RequestPayload::post_json(
    ///     "https://api.openai.com/v1/audio/speech",
    ///     &json!({"model": "gpt-4o-mini-tts", "input": "Hi"}),
    /// );
    /// assert_eq!(payload.method, "POST");
    /// assert!(payload.headers.iter().any(|(k, v)| {
    ///     k == "Content-Type" && v == "application/json"
    /// }));
    /// ```
    pub fn post_json(uri: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            method: "POST".to_string(),
            uri: uri.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string().into_bytes(),
        }
    }

    /// Add a header pair, returning the modified payload.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Parse the body back into JSON. Used mainly by tests and logging.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
