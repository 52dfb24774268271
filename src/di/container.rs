//! Service container for dependency injection

use super::traits::{ConfigProvider, PackageFetcher, ProcessRunner, ReleaseResolver, RemoteHost};
use crate::config::Config;
use crate::core::HelperResult;
use crate::http::HttpFetcher;
use crate::marketplace::MarketplaceResolver;
use crate::process::TokioProcessRunner;
use crate::remote::SshRemote;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds every collaborator of the install flows as a trait object so tests
/// can swap in mocks. The remote host is present only when a remote context
/// is active.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub fetcher: Arc<dyn PackageFetcher>,
    pub resolver: Arc<dyn ReleaseResolver>,
    pub runner: Arc<dyn ProcessRunner>,
    pub remote: Option<Arc<dyn RemoteHost>>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// - Loads config from disk (creating a default one)
    /// - Builds the HTTP client from the proxy environment
    /// - Connects remote operations to `remote_host` over SSH when given
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new(remote_host: Option<String>) -> HelperResult<Self> {
        let config = Config::load()?;
        Self::from_config(config, remote_host)
    }

    /// Create a production container from an already loaded config
    pub fn from_config(config: Config, remote_host: Option<String>) -> HelperResult<Self> {
        let fetcher: Arc<dyn PackageFetcher> = Arc::new(HttpFetcher::from_env()?);
        let remote = remote_host.map(|host| Arc::new(SshRemote::new(host)) as Arc<dyn RemoteHost>);

        Ok(Self::with_providers(
            Arc::new(config),
            fetcher,
            Arc::new(TokioProcessRunner),
            remote,
        ))
    }

    /// Create a service container with custom provider implementations
    ///
    /// The resolver is the marketplace scraper bound to `fetcher` and the
    /// configured marketplace URL; use [`ServiceContainer::with_resolver`] to
    /// replace it.
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        fetcher: Arc<dyn PackageFetcher>,
        runner: Arc<dyn ProcessRunner>,
        remote: Option<Arc<dyn RemoteHost>>,
    ) -> Self {
        let resolver = Arc::new(MarketplaceResolver::new(
            Arc::clone(&fetcher),
            config.marketplace_url(),
        ));

        Self {
            config,
            fetcher,
            resolver,
            runner,
            remote,
        }
    }

    /// Replace the release resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn ReleaseResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the HTTP fetcher
    pub fn fetcher(&self) -> &dyn PackageFetcher {
        self.fetcher.as_ref()
    }

    /// Get the release resolver
    pub fn resolver(&self) -> &dyn ReleaseResolver {
        self.resolver.as_ref()
    }

    /// Get the process runner
    pub fn runner(&self) -> &dyn ProcessRunner {
        self.runner.as_ref()
    }

    /// Get the remote host, if a remote context is active
    pub fn remote(&self) -> Option<&dyn RemoteHost> {
        self.remote.as_deref()
    }
}
