//! Proxy settings derived from the conventional environment variables.
//!
//! The derivation is intentionally naive: the host is whatever sits between
//! `://` and the next `:`, the port is whatever follows the last `:`. No URL
//! grammar is applied.

use crate::core::{HelperError, HelperResult};

pub const HTTP_PROXY_ENV: &str = "HTTP_PROXY";
pub const HTTPS_PROXY_ENV: &str = "HTTPS_PROXY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
}

impl ProxySettings {
    /// Proxy URL handed to the HTTP client. The proxy itself is always spoken to over http.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Derive settings from `HTTP_PROXY`, falling back to `HTTPS_PROXY`.
    pub fn from_env() -> HelperResult<Option<Self>> {
        let http = std::env::var(HTTP_PROXY_ENV).ok();
        let https = std::env::var(HTTPS_PROXY_ENV).ok();
        derive_proxy(http.as_deref(), https.as_deref())
    }
}

/// Derive proxy settings from raw variable values.
///
/// Returns `Ok(None)` when neither variable is set, `ProxyConfigError` when one
/// is set but has no host or a non-numeric port.
pub fn derive_proxy(http: Option<&str>, https: Option<&str>) -> HelperResult<Option<ProxySettings>> {
    let raw = match http
        .filter(|v| !v.trim().is_empty())
        .or_else(|| https.filter(|v| !v.trim().is_empty()))
    {
        Some(raw) => raw.trim(),
        None => return Ok(None),
    };

    let host = raw
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split(':').next())
        .unwrap_or("")
        .trim_end_matches('/');

    if host.is_empty() {
        return Err(HelperError::ProxyConfigError(format!(
            "missing host in '{}'",
            raw
        )));
    }

    let port_part = raw.rsplit(':').next().unwrap_or("").trim_end_matches('/');
    let port = port_part.parse::<u16>().map_err(|_| {
        HelperError::ProxyConfigError(format!("invalid port '{}' in '{}'", port_part, raw))
    })?;

    Ok(Some(ProxySettings {
        host: host.to_string(),
        port,
    }))
}
