//! HTTP transport seam.
//!
//! The pipeline performs exactly one outbound call per run, bounded by a
//! caller-supplied timeout. The transport sits behind a trait so tests can
//! substitute canned responses without a network.

use cadenza_core::RequestPayload;
use cadenza_error::{CadenzaResult, HttpError};
use std::time::Duration;
use tracing::{debug, error};

/// A raw HTTP response: status, headers, body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs as received.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response. Mainly useful for tests and mocks.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status is in the success range `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body decoded as UTF-8, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Trait for performing the one synchronous outbound call.
///
/// Implementations must bound the call by `timeout` and surface every
/// transport-level failure (connect, timeout, body read) as an error; a
/// response with a non-success status is still an `Ok` response.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the payload and collect the full response.
    async fn send(&self, payload: &RequestPayload, timeout: Duration) -> CadenzaResult<HttpResponse>;
}

/// Reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, payload), fields(method = %payload.method, uri = %payload.uri))]
    async fn send(
        &self,
        payload: &RequestPayload,
        timeout: Duration,
    ) -> CadenzaResult<HttpResponse> {
        debug!("Sending request");

        let method = reqwest::Method::from_bytes(payload.method.as_bytes())
            .map_err(|e| HttpError::new(format!("Invalid method {}: {}", payload.method, e)))?;

        let mut request = self
            .client
            .request(method, &payload.uri)
            .timeout(timeout)
            .body(payload.body.clone());
        for (name, value) in &payload.headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "Failed to reach endpoint");
            if e.is_timeout() {
                HttpError::new(format!("Request timed out: {}", e))
            } else {
                HttpError::new(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to read response body");
                HttpError::new(format!("Failed to read response body: {}", e))
            })?
            .to_vec();

        debug!(status, size = body.len(), "Received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(
            200,
            vec![("content-type".to_string(), "audio/mpeg".to_string())],
            Vec::new(),
        );
        assert_eq!(response.header("Content-Type"), Some("audio/mpeg"));
        assert_eq!(response.header("X-Missing"), None);
    }

    #[test]
    fn success_range_is_half_open() {
        assert!(HttpResponse::new(200, Vec::new(), Vec::new()).is_success());
        assert!(HttpResponse::new(299, Vec::new(), Vec::new()).is_success());
        assert!(!HttpResponse::new(300, Vec::new(), Vec::new()).is_success());
        assert!(!HttpResponse::new(199, Vec::new(), Vec::new()).is_success());
    }
}
