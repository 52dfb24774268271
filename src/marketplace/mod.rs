//! Marketplace version resolution
//!
//! The marketplace has no public "latest version" endpoint we rely on; the
//! version is scraped from the item page. The first `"VersionValue":"..."`
//! marker in the page wins. This is fragile coupling to an undocumented page
//! layout and is kept behind [`ReleaseResolver`] so it can be replaced.

use crate::core::{ExtensionIdentifier, HelperError, HelperResult};
use crate::di::{PackageFetcher, ReleaseResolver};
use crate::http::ResponseKind;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// A version of an extension with its download location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub identifier: ExtensionIdentifier,
    pub version: String,
    pub package_url: String,
}

/// Item page URL: `{base}/items?itemName={publisher}.{name}`
pub fn item_page_url(base_url: &str, identifier: &ExtensionIdentifier) -> String {
    format!(
        "{}/items?itemName={}.{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&identifier.publisher),
        urlencoding::encode(&identifier.name)
    )
}

/// Package download URL for a specific version
pub fn package_url(base_url: &str, identifier: &ExtensionIdentifier, version: &str) -> String {
    format!(
        "{}/_apis/public/gallery/publishers/{}/vsextensions/{}/{}/vspackage",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&identifier.publisher),
        urlencoding::encode(&identifier.name),
        urlencoding::encode(version)
    )
}

fn version_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r#""VersionValue":"([^"]+)""#).expect("version marker pattern is valid")
    })
}

/// First version marker in an item page, if any
pub fn extract_version(page: &str) -> Option<&str> {
    version_marker()
        .captures(page)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Resolves releases by scraping the marketplace item page
pub struct MarketplaceResolver {
    fetcher: Arc<dyn PackageFetcher>,
    base_url: String,
}

impl MarketplaceResolver {
    pub fn new(fetcher: Arc<dyn PackageFetcher>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn resolve(&self, identifier: &ExtensionIdentifier) -> HelperResult<ResolvedRelease> {
        let page_url = item_page_url(&self.base_url, identifier);
        tracing::info!("Fetching extension info from {}", page_url);

        let page = self
            .fetcher
            .fetch(&page_url, ResponseKind::Text)
            .await?
            .into_text();

        if page.trim().is_empty() {
            return Err(HelperError::NotFound(identifier.to_string()));
        }

        let version = extract_version(&page).ok_or_else(|| {
            HelperError::ParseError(format!("no version marker on the page for {}", identifier))
        })?;
        tracing::info!("Resolved {} to version {}", identifier, version);

        let package_url = package_url(&self.base_url, identifier, version);
        tracing::info!("Package URL: {}", package_url);

        Ok(ResolvedRelease {
            identifier: identifier.clone(),
            version: version.to_string(),
            package_url,
        })
    }
}

#[async_trait]
impl ReleaseResolver for MarketplaceResolver {
    async fn resolve(&self, identifier: &ExtensionIdentifier) -> HelperResult<ResolvedRelease> {
        self.resolve(identifier).await
    }
}
