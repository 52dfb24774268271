//! Package staging and installation.

pub mod installer;
pub mod staging;

pub use installer::{InstallOutcome, Installer, RemoteInstaller};
pub use staging::DownloadedPackage;
