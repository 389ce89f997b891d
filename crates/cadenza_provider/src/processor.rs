//! Action processing pipeline.
//!
//! One `process()` call runs the stages exactly once, in order: rate-limit
//! check, request building, the outbound call, classification, artifact
//! persistence, result assembly. No stage is revisited and nothing below
//! this module leaks a raw transport error to the caller; every path
//! converges on [`ActionResult`].

use crate::adapter::RequestAdapter;
use crate::classify::{classify_audio, classify_image};
use crate::config::ProviderConfig;
use crate::transport::{HttpResponse, HttpTransport};
use cadenza_core::{Action, ActionFailure, ActionKind, ActionResult, ActionSuccess, RequestPayload};
use cadenza_error::{CadenzaError, CadenzaErrorKind, CadenzaResult};
use cadenza_rate_limit::{FixedWindowLimiter, Scope};
use cadenza_storage::{ArtifactLocation, ArtifactStore};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, instrument};

/// Sentinel error code for transport-level failures (timeout, connect,
/// body read), distinct from any upstream HTTP status.
pub const TRANSPORT_ERROR_CODE: u32 = 599;

/// Error code surfaced for configuration errors caught at build time.
pub const CONFIG_ERROR_CODE: u32 = 400;

/// Orchestrates the pipeline stages for both action kinds.
///
/// Each stage is independently callable, so hosts and tests can probe the
/// rate limiter or the request builder without performing a network call.
pub struct ActionProcessor {
    config: ProviderConfig,
    limiter: Arc<FixedWindowLimiter>,
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn ArtifactStore>,
}

impl ActionProcessor {
    /// Assemble a processor from its collaborators.
    pub fn new(
        config: ProviderConfig,
        limiter: Arc<FixedWindowLimiter>,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            config,
            limiter,
            transport,
            store,
        }
    }

    /// The provider configuration in use.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Stage 1: rate-limit check, user scope then global scope.
    ///
    /// The order is fixed and significant: the first denial short-circuits,
    /// so a user-scope denial never consumes global quota.
    pub fn check_rate_limit(&self, action: &Action, now_secs: u64) -> Result<(), ActionFailure> {
        if !self
            .limiter
            .allow(&Scope::User(action.user_id), &self.config.user_limit, now_secs)
        {
            return Err(ActionFailure::new(429, "User rate limit exceeded"));
        }
        if !self
            .limiter
            .allow(&Scope::Global, &self.config.global_limit, now_secs)
        {
            return Err(ActionFailure::new(429, "Global rate limit exceeded"));
        }
        Ok(())
    }

    /// Stage 2: build the outbound payload, including auth headers.
    pub fn build_request(&self, action: &Action) -> CadenzaResult<RequestPayload> {
        let adapter = RequestAdapter::for_kind(action.kind, self.config.action_config(action.kind));
        let user_ref = self.user_reference(action.user_id);
        let mut payload = adapter
            .build_request(action, &user_ref)?
            .with_header("Authorization", format!("Bearer {}", self.config.api_key));
        if let Some(org_id) = &self.config.org_id {
            payload = payload.with_header("OpenAI-Organization", org_id.clone());
        }
        Ok(payload)
    }

    /// Stage 3: the one outbound call, bounded by the configured timeout.
    pub async fn send(&self, payload: &RequestPayload) -> CadenzaResult<HttpResponse> {
        self.transport.send(payload, self.config.timeout).await
    }

    /// Stages 4-5 for speech: classify, persist, assemble.
    async fn complete_speech(
        &self,
        action: &Action,
        response: &HttpResponse,
    ) -> Result<ActionSuccess, ActionFailure> {
        let requested_format = action
            .param("format")
            .or_else(|| self.config.speech.default_value("format"))
            .unwrap_or("mp3");
        let audio = classify_audio(response, requested_format)?;

        let filename = artifact_filename("openai-tts", &audio.extension);
        let location = ArtifactLocation::new(
            action.context_id,
            "cadenza_provider",
            "generatedaudio",
            0,
            "/",
            &filename,
        );
        let reference = self
            .store
            .create(&location, &audio.bytes, &audio.mimetype)
            .await
            .map_err(|e| storage_failure(&e))?;

        Ok(ActionSuccess {
            mimetype: audio.mimetype,
            filename,
            filesize: reference.size_bytes,
            artifact_id: reference.id.to_string(),
            draft_file: None,
            source_url: None,
            revised_prompt: None,
        })
    }

    /// Stages 4-5 for images: decode, persist into the user draft area,
    /// assemble.
    async fn complete_image(
        &self,
        action: &Action,
        response: &HttpResponse,
    ) -> Result<ActionSuccess, ActionFailure> {
        let image = classify_image(response)?;

        let filename = artifact_filename("openai-image", &image.output_format);
        // Placements act on behalf of the user, so the image lands in the
        // user's draft area rather than the action context.
        let location = ArtifactLocation::new(action.user_id, "user", "draft", 0, "/", &filename);
        let mimetype = format!("image/{}", image.output_format);
        let reference = self
            .store
            .create(&location, &image.bytes, &mimetype)
            .await
            .map_err(|e| storage_failure(&e))?;

        Ok(ActionSuccess {
            mimetype,
            filename: filename.clone(),
            filesize: reference.size_bytes,
            artifact_id: reference.id.to_string(),
            draft_file: Some(filename),
            // The b64_json dialect provides neither a source URL nor a
            // revised prompt.
            source_url: None,
            revised_prompt: None,
        })
    }

    /// Run the full pipeline once at the given clock reading.
    #[instrument(skip(self, action), fields(kind = %action.kind, user_id = action.user_id))]
    pub async fn process_at(&self, action: &Action, now_secs: u64) -> ActionResult {
        if let Err(denied) = self.check_rate_limit(action, now_secs) {
            debug!(code = denied.error_code, "Request denied by rate limiter");
            return denied.into();
        }

        let payload = match self.build_request(action) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to build request");
                return failure_from_error(&e).into();
            }
        };

        let response = match self.send(&payload).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Transport failure");
                return failure_from_error(&e).into();
            }
        };

        let outcome = match action.kind {
            ActionKind::ConvertTextToSpeech => self.complete_speech(action, &response).await,
            ActionKind::GenerateImage => self.complete_image(action, &response).await,
        };
        match outcome {
            Ok(success) => {
                debug!(filename = %success.filename, size = success.filesize, "Action completed");
                success.into()
            }
            Err(failure) => failure.into(),
        }
    }

    /// Run the full pipeline once using the wall clock.
    pub async fn process(&self, action: &Action) -> ActionResult {
        self.process_at(action, epoch_secs()).await
    }

    /// Opaque per-user identifier embedded in payloads that want one.
    pub fn user_reference(&self, user_id: i64) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.config.user_hash_salt.as_bytes());
        hasher.update(b":");
        hasher.update(user_id.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Map an internal error onto the uniform failure shape.
fn failure_from_error(error: &CadenzaError) -> ActionFailure {
    match error.kind() {
        CadenzaErrorKind::Config(e) => ActionFailure::new(CONFIG_ERROR_CODE, e.message.clone()),
        CadenzaErrorKind::Http(e) => ActionFailure::new(TRANSPORT_ERROR_CODE, e.message.clone()),
        other => ActionFailure::new(TRANSPORT_ERROR_CODE, other.to_string()),
    }
}

fn storage_failure(error: &CadenzaError) -> ActionFailure {
    ActionFailure::new(500, format!("Failed to store artifact: {}", error))
}

/// `<prefix>-<timestamp>.<extension>` artifact names.
fn artifact_filename(prefix: &str, extension: &str) -> String {
    format!("{}-{}.{}", prefix, epoch_secs(), extension)
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
