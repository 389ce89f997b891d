//! Declarative setting descriptors for the admin surface.
//!
//! The core never reads ambient configuration; a host assembles a
//! [`SettingMap`] from whatever storage it owns and passes it in at
//! construction time. [`SettingField`] describes what a host should ask
//! for: name, display label, default, and whether the value is required.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque mapping from setting key to configured value.
pub type SettingMap = HashMap<String, String>;

/// One configurable field for an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingField {
    /// Setting key, e.g. `action_convert_text_to_speech_model`.
    pub name: String,
    /// Display label for the host admin UI.
    pub label: String,
    /// Longer description of the setting.
    pub description: String,
    /// Default value used when the host supplies none.
    pub default: String,
    /// Whether a value must be present for the action to work.
    pub required: bool,
    /// Fixed choice list (value, display) when the field is a select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<(String, String)>>,
}

impl SettingField {
    /// A free-text field.
    pub fn text(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            default: default.into(),
            required,
            choices: None,
        }
    }

    /// A select field restricted to fixed choices.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
        choices: Vec<(String, String)>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            default: default.into(),
            required: false,
            choices: Some(choices),
        }
    }
}
