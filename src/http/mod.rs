//! HTTP access to the marketplace
//!
//! A single `reqwest` client with a fixed 30 second per-attempt deadline,
//! proxy settings derived from `HTTP_PROXY`/`HTTPS_PROXY`, and a per-request
//! retry budget.

pub mod client;
pub mod proxy;
pub mod retry;

pub use client::HttpFetcher;
pub use proxy::ProxySettings;
pub use retry::RetryPolicy;

/// How a response body should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Text,
    Binary,
}

/// A fully read response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedBody {
    Text(String),
    Binary(Vec<u8>),
}

impl FetchedBody {
    /// Body as text. Binary bodies are decoded lossily.
    pub fn into_text(self) -> String {
        match self {
            FetchedBody::Text(text) => text,
            FetchedBody::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FetchedBody::Text(text) => text.into_bytes(),
            FetchedBody::Binary(bytes) => bytes,
        }
    }
}
