//! Core data types for the Cadenza AI provider library.
//!
//! This crate holds the pure data shapes shared across the workspace: the
//! [`Action`] a caller submits, the [`RequestPayload`] an adapter builds
//! from it, the uniform [`ActionResult`] every pipeline run produces, and
//! the declarative [`SettingField`] descriptors for the admin surface.
//! No I/O lives here.
//!
//! # Example
//!
//! ```
//! use cadenza_core::{Action, ActionKind};
//!
//! let action = Action::builder()
//!     .kind(ActionKind::ConvertTextToSpeech)
//!     .user_id(7)
//!     .context_id(1)
//!     .param("input", "Hello world")
//!     .param("voice", "alloy")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(action.param("voice"), Some("alloy"));
//! ```

mod action;
mod payload;
mod result;
mod settings;

pub use action::{Action, ActionBuilder, ActionBuilderError, ActionKind};
pub use payload::RequestPayload;
pub use result::{ActionFailure, ActionResult, ActionSuccess};
pub use settings::{SettingField, SettingMap};
