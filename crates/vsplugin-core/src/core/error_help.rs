//! Human-facing hints attached to errors at the CLI boundary.

use super::error::HelperError;

/// Optional remediation text for an error.
pub trait ErrorHelp {
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for HelperError {
    fn help(&self) -> Option<&'static str> {
        match self {
            HelperError::MalformedIdentifier(_) => {
                Some("Use the full marketplace ID, for example: ms-python.python")
            }
            HelperError::NotFound(_) | HelperError::ParseError(_) => {
                Some("Check the ID on the marketplace page; the extension may be unpublished")
            }
            HelperError::NetworkError(_) | HelperError::Timeout(_) | HelperError::Http(_) => {
                Some("Check your connection or set HTTP_PROXY / HTTPS_PROXY")
            }
            HelperError::ProxyConfigError(_) => {
                Some("Proxy variables should look like http://host:port")
            }
            HelperError::RemoteUnsupported => Some(
                "Pass --host <ssh-host> or set VSPLUGIN_REMOTE_HOST to the connected remote host",
            ),
            HelperError::TransferError(_) => {
                Some("Make sure you can run `ssh <host>` non-interactively")
            }
            HelperError::InstallPathMissing => {
                Some("Run: vsplugin-helper config set-editor-path <editor install dir>")
            }
            HelperError::Config(_) | HelperError::Yaml(_) => {
                Some("Fix or delete the config file; it will be recreated with defaults")
            }
            _ => None,
        }
    }
}

/// Render an error followed by its hint, if it has one.
pub fn format_error_with_help(error: &HelperError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}
