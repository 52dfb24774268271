//! Integration tests module
//!
//! These tests run the `vsplugin-helper` binary in an isolated home and
//! config directory.

pub mod common;
pub mod config;
pub mod errors;
pub mod install;
pub mod install_remote;
