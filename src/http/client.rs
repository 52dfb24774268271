use super::proxy::ProxySettings;
use super::retry::{with_retry, RetryPolicy};
use super::{FetchedBody, ResponseKind};
use crate::core::{HelperError, HelperResult};
use crate::di::PackageFetcher;
use async_trait::async_trait;
use reqwest::{header, Client, Proxy, StatusCode};
use std::time::Duration;

/// Deadline for a single request attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client used for both marketplace pages and package downloads
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with an explicit proxy and retry policy
    pub fn new(proxy: Option<&ProxySettings>, retry: RetryPolicy) -> HelperResult<Self> {
        Self::with_timeout(proxy, retry, REQUEST_TIMEOUT)
    }

    /// Like [`HttpFetcher::new`] with a custom per-attempt deadline
    pub fn with_timeout(
        proxy: Option<&ProxySettings>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> HelperResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("vsplugin-helper/", env!("CARGO_PKG_VERSION"))),
        );

        // Only the derived proxy applies; reqwest's own env detection is off.
        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .no_proxy();

        if let Some(proxy) = proxy {
            let proxy = Proxy::all(proxy.url())
                .map_err(|e| HelperError::ProxyConfigError(format!("{}: {}", proxy.url(), e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| HelperError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry,
            timeout,
        })
    }

    /// Create a fetcher from the process environment with the default retry policy
    ///
    /// Malformed proxy variables are logged and ignored; the client then
    /// connects directly.
    pub fn from_env() -> HelperResult<Self> {
        let proxy = match ProxySettings::from_env() {
            Ok(proxy) => proxy,
            Err(e) => {
                tracing::warn!("{}; continuing without a proxy", e);
                None
            }
        };

        if let Some(ref proxy) = proxy {
            tracing::info!("Using proxy {}", proxy.url());
        }

        match Self::new(proxy.as_ref(), RetryPolicy::default()) {
            Ok(fetcher) => Ok(fetcher),
            Err(HelperError::ProxyConfigError(e)) => {
                tracing::warn!("Invalid proxy configuration: {}; continuing without a proxy", e);
                Self::new(None, RetryPolicy::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch a URL, retrying transient failures according to the policy
    pub async fn fetch(&self, url: &str, kind: ResponseKind) -> HelperResult<FetchedBody> {
        with_retry(self.retry, url, |attempt| {
            tracing::debug!("GET {} (attempt {})", url, attempt);
            self.fetch_once(url, kind)
        })
        .await
    }

    async fn fetch_once(&self, url: &str, kind: ResponseKind) -> HelperResult<FetchedBody> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HelperError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(HelperError::NetworkError(format!("HTTP {} for {}", status, url)));
        }

        match kind {
            ResponseKind::Text => {
                let text = response.text().await.map_err(|e| self.classify_error(url, e))?;
                Ok(FetchedBody::Text(text))
            }
            ResponseKind::Binary => {
                let bytes = response.bytes().await.map_err(|e| self.classify_error(url, e))?;
                Ok(FetchedBody::Binary(bytes.to_vec()))
            }
        }
    }

    fn classify_error(&self, url: &str, error: reqwest::Error) -> HelperError {
        if error.is_timeout() {
            HelperError::Timeout(format!(
                "{} did not respond within {} ms",
                url,
                self.timeout.as_millis()
            ))
        } else {
            HelperError::NetworkError(format!("{}: {}", url, error))
        }
    }
}

#[async_trait]
impl PackageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, kind: ResponseKind) -> HelperResult<FetchedBody> {
        self.fetch(url, kind).await
    }
}
