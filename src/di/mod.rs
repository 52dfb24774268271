//! Dependency injection infrastructure for vsplugin-helper
//!
//! Every stage of the install pipeline that touches the outside world
//! (configuration, HTTP, child processes, remote hosts) sits behind a trait so
//! the flows can be exercised without a network or an installed editor.
//!
//! # Example (Production)
//! ```no_run
//! use vsplugin_helper::di::ServiceContainer;
//!
//! # fn example() -> vsplugin_helper::HelperResult<()> {
//! let container = ServiceContainer::new(None)?;
//! assert!(container.remote().is_none());
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use vsplugin_helper::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let fetcher = Arc::new(MockPackageFetcher::new());
//! let runner = Arc::new(MockProcessRunner::new());
//!
//! let container = ServiceContainer::with_providers(config, fetcher, runner, None);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

pub use container::ServiceContainer;
pub use traits::{ConfigProvider, PackageFetcher, ProcessRunner, ReleaseResolver, RemoteHost};
