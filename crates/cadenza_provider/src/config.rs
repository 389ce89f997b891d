//! Provider configuration.
//!
//! Configuration is passed in explicitly at construction; the core never
//! reads ambient global state, which keeps the limiter and adapters
//! testable without a host environment.

use crate::settings::{action_settings, setting_key};
use cadenza_core::{ActionKind, SettingMap};
use cadenza_rate_limit::RateLimitConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Resolved configuration for one action kind.
///
/// Values come from a host-supplied [`SettingMap`], falling back to the
/// catalogue defaults for anything the host left unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionConfig {
    /// Model identifier sent in the payload.
    pub model: String,
    /// Endpoint the request is posted to.
    pub endpoint: String,
    /// Remaining per-action defaults keyed by short field name
    /// (`voice`, `format`, `systeminstruction`).
    pub defaults: HashMap<String, String>,
}

impl ActionConfig {
    /// Resolve an action config from an opaque setting map.
    pub fn from_settings(kind: ActionKind, settings: &SettingMap) -> Self {
        let mut model = String::new();
        let mut endpoint = String::new();
        let mut defaults = HashMap::new();

        let prefix = setting_key(kind, "");
        for field in action_settings(kind) {
            let value = settings
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.default.clone());
            let short = field
                .name
                .strip_prefix(&prefix)
                .unwrap_or(&field.name)
                .to_string();
            match short.as_str() {
                "model" => model = value,
                "endpoint" => endpoint = value,
                _ => {
                    defaults.insert(short, value);
                }
            }
        }

        Self {
            model,
            endpoint,
            defaults,
        }
    }

    /// Catalogue defaults with no host overrides.
    pub fn defaults_for(kind: ActionKind) -> Self {
        Self::from_settings(kind, &SettingMap::new())
    }

    /// Look up a per-action default value.
    pub fn default_value(&self, field: &str) -> Option<&str> {
        self.defaults.get(field).map(String::as_str)
    }
}

/// Provider-wide configuration: credentials, rate limits, timeouts, and the
/// per-action configs.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API credential. The provider is unconfigured while this is empty.
    pub api_key: String,
    /// Organisation id that goes with the key, when the account has one.
    pub org_id: Option<String>,
    /// Per-user rate limit.
    pub user_limit: RateLimitConfig,
    /// Global rate limit shared by all users.
    pub global_limit: RateLimitConfig,
    /// Bound on the single outbound call.
    pub timeout: Duration,
    /// Salt mixed into opaque per-user identifiers.
    pub user_hash_salt: String,
    /// Text-to-speech action configuration.
    pub speech: ActionConfig,
    /// Image generation action configuration.
    pub image: ActionConfig,
}

impl ProviderConfig {
    /// Create a config with catalogue defaults for everything except the
    /// credential: rate limiting disabled, 30 second timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: None,
            user_limit: RateLimitConfig::disabled(),
            global_limit: RateLimitConfig::disabled(),
            timeout: Duration::from_secs(30),
            user_hash_salt: "cadenza".to_string(),
            speech: ActionConfig::defaults_for(ActionKind::ConvertTextToSpeech),
            image: ActionConfig::defaults_for(ActionKind::GenerateImage),
        }
    }

    /// Set the per-user rate limit.
    pub fn with_user_limit(mut self, limit: RateLimitConfig) -> Self {
        self.user_limit = limit;
        self
    }

    /// Set the global rate limit.
    pub fn with_global_limit(mut self, limit: RateLimitConfig) -> Self {
        self.global_limit = limit;
        self
    }

    /// Set the outbound call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply host-supplied action settings over the catalogue defaults.
    pub fn with_action_settings(mut self, kind: ActionKind, settings: &SettingMap) -> Self {
        match kind {
            ActionKind::ConvertTextToSpeech => {
                self.speech = ActionConfig::from_settings(kind, settings);
            }
            ActionKind::GenerateImage => {
                self.image = ActionConfig::from_settings(kind, settings);
            }
        }
        self
    }

    /// The action config for a kind.
    pub fn action_config(&self, kind: ActionKind) -> &ActionConfig {
        match kind {
            ActionKind::ConvertTextToSpeech => &self.speech,
            ActionKind::GenerateImage => &self.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_defaults_resolve_without_a_host() {
        let config = ActionConfig::defaults_for(ActionKind::ConvertTextToSpeech);
        assert_eq!(config.model, "gpt-4o-mini-tts");
        assert_eq!(config.endpoint, "https://api.openai.com/v1/audio/speech");
        assert_eq!(config.default_value("voice"), Some("alloy"));
        assert_eq!(config.default_value("format"), Some("mp3"));
    }

    #[test]
    fn host_settings_override_defaults() {
        let mut settings = SettingMap::new();
        settings.insert(
            "action_convert_text_to_speech_voice".to_string(),
            "nova".to_string(),
        );
        let config = ActionConfig::from_settings(ActionKind::ConvertTextToSpeech, &settings);
        assert_eq!(config.default_value("voice"), Some("nova"));
        // Untouched fields keep catalogue defaults.
        assert_eq!(config.model, "gpt-4o-mini-tts");
    }
}
