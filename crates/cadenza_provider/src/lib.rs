//! Rate-limited OpenAI speech and image pipeline.
//!
//! This crate turns structured "convert text to speech" and "generate
//! image" actions into outbound HTTP calls against the OpenAI dialect,
//! then normalizes the outcome into a persisted artifact plus a uniform
//! success/error result. The pipeline is guarded by a dual-scope
//! fixed-window rate limiter and never leaks a raw transport error to its
//! caller.
//!
//! # Example
//!
//! ```no_run
//! use cadenza_core::{Action, ActionKind};
//! use cadenza_provider::{Provider, ProviderConfig, ReqwestTransport};
//! use cadenza_storage::FileSystemStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::new(
//!     ProviderConfig::new(std::env::var("OPENAI_API_KEY")?),
//!     Arc::new(ReqwestTransport::new()),
//!     Arc::new(FileSystemStore::new("/var/cadenza/artifacts")?),
//! );
//!
//! let action = Action::builder()
//!     .kind(ActionKind::ConvertTextToSpeech)
//!     .user_id(1)
//!     .context_id(1)
//!     .param("input", "Hello world")
//!     .build()?;
//!
//! let result = provider.process(&action).await;
//! if let Some(success) = result.as_success() {
//!     println!("stored {} ({} bytes)", success.filename, success.filesize);
//! }
//! # Ok(())
//! # }
//! ```

mod adapter;
mod classify;
mod config;
mod processor;
mod provider;
mod settings;
mod telemetry;
mod transport;

pub use adapter::{RequestAdapter, aspect_ratio_to_size, map_quality};
pub use classify::{
    AudioPayload, ImagePayload, classify_audio, classify_error, classify_image,
    extension_for_mimetype, mimetype_for_format, status_phrase,
};
pub use config::{ActionConfig, ProviderConfig};
pub use processor::{ActionProcessor, CONFIG_ERROR_CODE, TRANSPORT_ERROR_CODE};
pub use provider::Provider;
pub use settings::{action_settings, setting_key};
pub use telemetry::init_telemetry;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
