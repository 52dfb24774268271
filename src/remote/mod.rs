//! Remote host access and package transfer
//!
//! A remote context is an SSH host chosen with `--host` or the
//! `VSPLUGIN_REMOTE_HOST` environment variable. It is detected once, before
//! any network activity.

pub mod ssh;
pub mod transporter;

pub use ssh::SshRemote;
pub use transporter::{RemoteStagedPackage, Transporter};

/// Environment variable naming the active remote host.
pub const REMOTE_HOST_ENV: &str = "VSPLUGIN_REMOTE_HOST";

/// Active remote host: the explicit flag, else the environment variable
pub fn detect_remote_host(flag: Option<&str>) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| std::env::var(REMOTE_HOST_ENV).ok())
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
}

/// Quote a string for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
