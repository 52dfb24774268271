use thiserror::Error;

pub type HelperResult<T> = Result<T, HelperError>;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The identifier is not of the form `publisher.name`.
    #[error("Malformed extension identifier '{0}': expected <publisher>.<name>")]
    MalformedIdentifier(String),

    /// The marketplace answered without the expected page content.
    #[error("Extension not found: {0}")]
    NotFound(String),

    /// The marketplace page has no recognizable version marker.
    #[error("Could not read extension version: {0}")]
    ParseError(String),

    /// All attempts of a request failed.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A single attempt exceeded the request deadline.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Proxy environment variables are present but unusable.
    #[error("Invalid proxy configuration: {0}")]
    ProxyConfigError(String),

    #[error("Remote install requires an active remote connection")]
    RemoteUnsupported,

    #[error("Remote transfer failed: {0}")]
    TransferError(String),

    #[error("Editor installation path not found: set editor_path in config or the TRAE_HOME environment variable")]
    InstallPathMissing,

    /// The install binary reported an error. Carries its stderr.
    #[error("Install failed: {0}")]
    InstallFailed(String),
}
