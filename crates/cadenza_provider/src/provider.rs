//! Provider facade.

use crate::config::ProviderConfig;
use crate::processor::ActionProcessor;
use crate::settings::action_settings;
use crate::transport::HttpTransport;
use cadenza_core::{Action, ActionFailure, ActionKind, ActionResult, SettingField};
use cadenza_rate_limit::FixedWindowLimiter;
use cadenza_storage::ArtifactStore;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Routing facade over the pipeline.
///
/// Owns the configuration, the rate limiter, and the per-action
/// processors; callers hand it actions and get uniform results back.
///
/// # Example
///
/// ```no_run
/// use cadenza_provider::{Provider, ProviderConfig, ReqwestTransport};
/// use cadenza_storage::FileSystemStore;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::new(
///     ProviderConfig::new("sk-..."),
///     Arc::new(ReqwestTransport::new()),
///     Arc::new(FileSystemStore::new("/var/cadenza/artifacts")?),
/// );
/// assert!(provider.is_provider_configured());
/// # Ok(())
/// # }
/// ```
pub struct Provider {
    limiter: Arc<FixedWindowLimiter>,
    processor: ActionProcessor,
}

impl Provider {
    /// Create a provider from its configuration and collaborators.
    pub fn new(
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        let limiter = Arc::new(FixedWindowLimiter::new());
        let processor = ActionProcessor::new(config, Arc::clone(&limiter), transport, store);
        Self { limiter, processor }
    }

    /// The action kinds this provider can process: the full closed set.
    pub fn action_list(&self) -> Vec<ActionKind> {
        ActionKind::iter().collect()
    }

    /// Whether the minimum required credentials are present. A precondition
    /// check, not a network probe.
    pub fn is_provider_configured(&self) -> bool {
        !self.processor.config().api_key.is_empty()
    }

    /// Probe the rate limiter for an action without processing it.
    ///
    /// Consumes quota exactly like `process()` would: user scope first,
    /// then global, short-circuiting on the first denial.
    pub fn is_request_allowed(&self, action: &Action) -> Result<(), ActionFailure> {
        self.is_request_allowed_at(action, epoch_secs())
    }

    /// Clock-injected variant of [`Self::is_request_allowed`].
    pub fn is_request_allowed_at(
        &self,
        action: &Action,
        now_secs: u64,
    ) -> Result<(), ActionFailure> {
        self.processor.check_rate_limit(action, now_secs)
    }

    /// Process an action through the full pipeline.
    #[instrument(skip(self, action), fields(kind = %action.kind))]
    pub async fn process(&self, action: &Action) -> ActionResult {
        debug!("Processing action");
        self.processor.process(action).await
    }

    /// Clock-injected variant of [`Self::process`] for deterministic
    /// window control.
    pub async fn process_at(&self, action: &Action, now_secs: u64) -> ActionResult {
        self.processor.process_at(action, now_secs).await
    }

    /// Stable opaque identifier for a user, suitable for upstream `user`
    /// fields: a 64 character hex digest salted per provider instance.
    pub fn generate_user_id(&self, user_id: i64) -> String {
        self.processor.user_reference(user_id)
    }

    /// Declarative setting descriptors for an action kind.
    pub fn action_settings(kind: ActionKind) -> Vec<SettingField> {
        action_settings(kind)
    }

    /// The rate limiter shared by all of this provider's actions.
    pub fn limiter(&self) -> &FixedWindowLimiter {
        &self.limiter
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
