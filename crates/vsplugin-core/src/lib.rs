//! Core utilities shared by the vsplugin-helper binary and library.
//!
//! Holds the error taxonomy, well-known paths and the extension identifier
//! type. Nothing in here performs network or process I/O.

pub mod core;

pub use crate::core::error::{HelperError, HelperResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
pub use crate::core::identifier::ExtensionIdentifier;
