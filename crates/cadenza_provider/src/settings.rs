//! Declarative settings catalogue for the admin surface.
//!
//! These descriptors tell a host what to ask for per action; the values
//! come back to the core as an opaque [`SettingMap`]. Defaults mirror the
//! OpenAI dialect the adapters speak.

use cadenza_core::{ActionKind, SettingField};

/// Setting key for a field of an action, e.g.
/// `action_convert_text_to_speech_model`.
pub fn setting_key(kind: ActionKind, field: &str) -> String {
    format!("action_{}_{}", kind.as_str(), field)
}

/// The configurable fields for one action kind.
pub fn action_settings(kind: ActionKind) -> Vec<SettingField> {
    match kind {
        ActionKind::ConvertTextToSpeech => speech_settings(),
        ActionKind::GenerateImage => image_settings(),
    }
}

fn speech_settings() -> Vec<SettingField> {
    let kind = ActionKind::ConvertTextToSpeech;
    vec![
        SettingField::text(
            setting_key(kind, "model"),
            "Model",
            "Model used to convert text to speech.",
            "gpt-4o-mini-tts",
            true,
        ),
        SettingField::text(
            setting_key(kind, "endpoint"),
            "API endpoint",
            "Endpoint the speech request is posted to.",
            "https://api.openai.com/v1/audio/speech",
            true,
        ),
        SettingField::select(
            setting_key(kind, "voice"),
            "Voice",
            "Default voice when the action does not choose one.",
            "alloy",
            choice_list(&[
                ("alloy", "Alloy"),
                ("ash", "Ash"),
                ("ballad", "Ballad"),
                ("coral", "Coral"),
                ("echo", "Echo"),
                ("fable", "Fable"),
                ("nova", "Nova"),
                ("onyx", "Onyx"),
                ("sage", "Sage"),
                ("shimmer", "Shimmer"),
            ]),
        ),
        SettingField::select(
            setting_key(kind, "format"),
            "Audio format",
            "Default response format when the action does not choose one.",
            "mp3",
            choice_list(&[
                ("mp3", "mp3"),
                ("wav", "wav"),
                ("flac", "flac"),
                ("ogg", "ogg"),
            ]),
        ),
        SettingField::text(
            setting_key(kind, "systeminstruction"),
            "System instruction",
            "Instruction text sent alongside the input.",
            "",
            false,
        ),
    ]
}

fn image_settings() -> Vec<SettingField> {
    let kind = ActionKind::GenerateImage;
    vec![
        SettingField::text(
            setting_key(kind, "model"),
            "Model",
            "Model used to generate images.",
            "gpt-image-1",
            true,
        ),
        SettingField::text(
            setting_key(kind, "endpoint"),
            "API endpoint",
            "Endpoint the image request is posted to.",
            "https://api.openai.com/v1/images/generations",
            true,
        ),
    ]
}

fn choice_list(choices: &[(&str, &str)]) -> Vec<(String, String)> {
    choices
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_settings_cover_the_admin_surface() {
        let fields = action_settings(ActionKind::ConvertTextToSpeech);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"action_convert_text_to_speech_model"));
        assert!(names.contains(&"action_convert_text_to_speech_endpoint"));
        assert!(names.contains(&"action_convert_text_to_speech_voice"));
        assert!(names.contains(&"action_convert_text_to_speech_format"));
        assert!(names.contains(&"action_convert_text_to_speech_systeminstruction"));

        let model = fields.iter().find(|f| f.name.ends_with("_model")).unwrap();
        assert!(model.required);
        assert_eq!(model.default, "gpt-4o-mini-tts");
    }

    #[test]
    fn image_settings_default_to_the_b64_dialect_model() {
        let fields = action_settings(ActionKind::GenerateImage);
        let model = fields.iter().find(|f| f.name.ends_with("_model")).unwrap();
        assert_eq!(model.default, "gpt-image-1");
    }

    #[test]
    fn voice_choices_match_the_upstream_catalogue() {
        let fields = action_settings(ActionKind::ConvertTextToSpeech);
        let voice = fields.iter().find(|f| f.name.ends_with("_voice")).unwrap();
        let choices = voice.choices.as_ref().unwrap();
        assert_eq!(choices.len(), 10);
        assert!(choices.iter().any(|(v, _)| v == "shimmer"));
    }
}
