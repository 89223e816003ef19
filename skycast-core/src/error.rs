use thiserror::Error;

/// Failure raised by the HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure raised by a device position source.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The host has no position capability at all.
    #[error("no position capability is available on this host")]
    Unsupported,

    /// The capability exists but the one-shot request failed,
    /// e.g. permission denied.
    #[error("{0}")]
    Device(String),
}

/// Human-readable failure surfaced by the lookup operations.
///
/// Wraps an upstream error, keeping its message when it has one and
/// substituting a fixed per-operation fallback otherwise.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LookupError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl LookupError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an upstream failure under a normalized message.
    pub fn wrap<E>(source: E, fallback: &str) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let rendered = source.to_string();
        let message = if rendered.trim().is_empty() {
            fallback.to_string()
        } else {
            rendered
        };

        Self {
            message,
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
