//! Action types describing one generative request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of action kinds this library processes.
///
/// Dispatch throughout the pipeline happens on this tag; there is no
/// type-identity based specialization.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ActionKind {
    /// Convert text to a spoken audio artifact.
    #[display("convert_text_to_speech")]
    ConvertTextToSpeech,
    /// Generate an image artifact from a prompt.
    #[display("generate_image")]
    GenerateImage,
}

impl ActionKind {
    /// Convert to string representation for config keys and filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::ConvertTextToSpeech => "convert_text_to_speech",
            ActionKind::GenerateImage => "generate_image",
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "convert_text_to_speech" => Ok(ActionKind::ConvertTextToSpeech),
            "generate_image" => Ok(ActionKind::GenerateImage),
            _ => Err(format!("Unknown action kind: {}", s)),
        }
    }
}

/// An immutable request description.
///
/// Created by the caller before any processing, never mutated afterwards.
/// Named parameters (`input`, `voice`, `format`, `prompt`, `aspect_ratio`,
/// `quality`, ...) override provider-configured defaults where an adapter
/// exposes that field.
///
/// # Examples
///
/// ```
/// use cadenza_core::{Action, ActionKind};
///
/// let action = Action::builder()
///     .kind(ActionKind::GenerateImage)
///     .user_id(42)
///     .context_id(1)
///     .param("prompt", "A quiet harbour at dawn")
///     .param("aspect_ratio", "landscape")
///     .build()
///     .unwrap();
///
/// assert_eq!(action.kind, ActionKind::GenerateImage);
/// assert_eq!(action.param("aspect_ratio"), Some("landscape"));
/// assert_eq!(action.param("quality"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(pattern = "owned", setter(into))]
pub struct Action {
    /// What operation is requested.
    pub kind: ActionKind,
    /// Identity of the requesting user.
    pub user_id: i64,
    /// Identity of the owning context.
    pub context_id: i64,
    /// Named parameters for the action.
    #[builder(default)]
    pub params: HashMap<String, String>,
}

impl Action {
    /// Start building an action.
    pub fn builder() -> ActionBuilder {
        ActionBuilder::default()
    }

    /// Look up a named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl ActionBuilder {
    /// Add a single named parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}
