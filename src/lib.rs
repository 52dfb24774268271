//! vsplugin-helper: install marketplace extensions into a separately installed editor
//!
//! This crate re-exports the shared types from `vsplugin-core` and organizes
//! the install pipeline: marketplace resolution, package download, optional
//! transfer to a remote host, and invocation of the editor's install command.

pub use vsplugin_core::{
    format_error_with_help, ErrorHelp, ExtensionIdentifier, HelperError, HelperResult,
};

/// Core module re-exported from vsplugin-core.
pub mod core {
    pub use vsplugin_core::core::*;
    pub use vsplugin_core::*;
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// HTTP fetching with retry and proxy support.
pub mod http;

/// Marketplace version resolution.
pub mod marketplace;

/// Package staging and installation.
pub mod package;

/// Child process execution.
pub mod process;

/// Remote host access and package transfer.
pub mod remote;

/// Local and remote install flows.
pub mod workflow;

/// Log file and console setup.
pub mod logging;
