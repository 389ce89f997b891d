//! Error types for the Cadenza AI provider library.
//!
//! Every crate in the workspace reports failures through [`CadenzaError`],
//! a boxed kind enum with one variant per error domain. Domain errors carry
//! the source location where they were created, so log output points at the
//! offending call site without a backtrace.

mod config;
mod error;
mod http;
mod storage;

pub use config::ConfigError;
pub use error::{CadenzaError, CadenzaErrorKind, CadenzaResult};
pub use http::HttpError;
pub use storage::{StorageError, StorageErrorKind};
