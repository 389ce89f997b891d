//! Tests for the provider facade.

mod common;

use cadenza_core::{Action, ActionKind};
use cadenza_provider::{Provider, ProviderConfig};
use cadenza_rate_limit::RateLimitConfig;
use common::harness;
use strum::IntoEnumIterator;

const HOUR: u64 = 3600;

fn speech_action(user_id: i64) -> Action {
    Action::builder()
        .kind(ActionKind::ConvertTextToSpeech)
        .user_id(user_id)
        .context_id(1)
        .param("input", "Generate an audio file from this text.")
        .param("voice", "alloy")
        .param("format", "mp3")
        .build()
        .unwrap()
}

#[test]
fn action_list_covers_every_kind() {
    let h = harness(ProviderConfig::new("sk-test"));
    let actions = h.provider.action_list();
    assert_eq!(actions.len(), 2);
    assert!(actions.contains(&ActionKind::ConvertTextToSpeech));
    assert!(actions.contains(&ActionKind::GenerateImage));
    // The catalogue is the whole enum, in declaration order.
    let all: Vec<_> = ActionKind::iter().collect();
    assert_eq!(actions, all);
}

#[test]
fn provider_is_configured_only_with_an_api_key() {
    let h = harness(ProviderConfig::new(""));
    assert!(!h.provider.is_provider_configured());

    let h = harness(ProviderConfig::new("123"));
    assert!(h.provider.is_provider_configured());
}

#[test]
fn generated_user_ids_are_stable_64_char_digests() {
    let h = harness(ProviderConfig::new("sk-test"));
    let id = h.provider.generate_user_id(1);
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(id, h.provider.generate_user_id(1));
    assert_ne!(id, h.provider.generate_user_id(2));
}

#[test]
fn is_request_allowed_walks_user_then_global_scope() {
    let config = ProviderConfig::new("sk-test")
        .with_user_limit(RateLimitConfig::new(true, 3, HOUR).unwrap())
        .with_global_limit(RateLimitConfig::new(true, 5, HOUR).unwrap());
    let h = harness(config);
    let now = 1_000;

    // Three requests for the first user, all allowed.
    for _ in 0..3 {
        assert!(h.provider.is_request_allowed_at(&speech_action(1), now).is_ok());
    }

    // The fourth request for the same user is denied by the user scope.
    let denied = h
        .provider
        .is_request_allowed_at(&speech_action(1), now)
        .unwrap_err();
    assert_eq!(denied.error_code, 429);
    assert_eq!(denied.error_message, "User rate limit exceeded");

    // A different user passes; that makes 4 then 5 global grants.
    assert!(h.provider.is_request_allowed_at(&speech_action(2), now).is_ok());
    assert!(h.provider.is_request_allowed_at(&speech_action(2), now).is_ok());

    // The sixth overall request trips the global scope.
    let denied = h
        .provider
        .is_request_allowed_at(&speech_action(2), now)
        .unwrap_err();
    assert_eq!(denied.error_code, 429);
    assert_eq!(denied.error_message, "Global rate limit exceeded");
}

#[test]
fn user_scope_denial_consumes_no_global_quota() {
    let config = ProviderConfig::new("sk-test")
        .with_user_limit(RateLimitConfig::new(true, 1, HOUR).unwrap())
        .with_global_limit(RateLimitConfig::new(true, 10, HOUR).unwrap());
    let h = harness(config);
    let now = 1_000;

    assert!(h.provider.is_request_allowed_at(&speech_action(1), now).is_ok());
    assert!(h.provider.is_request_allowed_at(&speech_action(1), now).is_err());
    assert!(h.provider.is_request_allowed_at(&speech_action(1), now).is_err());

    // Only the granted request reached the global bucket.
    assert_eq!(
        h.provider.limiter().current_count(&cadenza_rate_limit::Scope::Global),
        1
    );
}

#[test]
fn settings_catalogue_is_exposed_per_kind() {
    let speech = Provider::action_settings(ActionKind::ConvertTextToSpeech);
    assert!(speech.iter().any(|f| f.name.ends_with("_voice")));

    let image = Provider::action_settings(ActionKind::GenerateImage);
    assert!(image.iter().any(|f| f.default == "gpt-image-1"));
}
