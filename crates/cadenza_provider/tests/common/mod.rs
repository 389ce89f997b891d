//! Shared test fixtures: a scripted transport and provider builders.
#![allow(dead_code)]

use cadenza_core::RequestPayload;
use cadenza_error::{CadenzaResult, HttpError};
use cadenza_provider::{HttpResponse, HttpTransport, Provider, ProviderConfig};
use cadenza_storage::FileSystemStore;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that replays scripted responses and records every payload it
/// was asked to send.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<RequestPayload>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a canned response.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Payloads sent so far.
    pub fn requests(&self) -> Vec<RequestPayload> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        payload: &RequestPayload,
        _timeout: Duration,
    ) -> CadenzaResult<HttpResponse> {
        self.requests.lock().unwrap().push(payload.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(HttpError::new(message).into()),
            None => panic!("MockTransport ran out of scripted responses"),
        }
    }
}

/// A provider wired to a mock transport and a tempdir-backed store.
pub struct TestHarness {
    pub provider: Provider,
    pub transport: Arc<MockTransport>,
    pub store_dir: tempfile::TempDir,
}

pub fn harness(config: ProviderConfig) -> TestHarness {
    let transport = MockTransport::new();
    let store_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSystemStore::new(store_dir.path()).unwrap());
    let provider = Provider::new(config, transport.clone(), store);
    TestHarness {
        provider,
        transport,
        store_dir,
    }
}

pub fn audio_response(bytes: &[u8]) -> HttpResponse {
    HttpResponse::new(
        200,
        vec![("Content-Type".to_string(), "audio/mpeg".to_string())],
        bytes.to_vec(),
    )
}
