//! Error taxonomy for the REST client core.

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum ErrorKind {
    /// Rejected before any network call.
    Validation,
    /// The service could not be reached.
    Network,
    /// The service answered with a non-200 status.
    Transport,
    /// The body could not be decoded into the expected shape.
    Decode,
}

/// Failure to reach the service or to read its response.
///
/// Produced by [`LocalTransport`](super::LocalTransport) implementations.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
#[allow(clippy::module_name_repetitions)]
pub struct NetworkError {
    message: String,
    timed_out: bool,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl NetworkError {
    /// Creates an error from a message and the underlying cause.
    pub fn new(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: Some(source.into()),
        }
    }

    /// Creates an error that has no underlying cause.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    /// Marks the error as caused by a timeout.
    #[must_use]
    pub const fn with_timeout(mut self) -> Self {
        self.timed_out = true;
        self
    }

    /// Whether the transport gave up waiting for the service.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let message = if err.is_connect() {
            "failed to connect to Festivo API"
        } else if timed_out {
            "Festivo API request timed out"
        } else if err.is_body() || err.is_decode() {
            "failed to read Festivo API response body"
        } else {
            "Festivo API request failed"
        };
        let error = Self::new(message, err);
        if timed_out { error.with_timeout() } else { error }
    }
}

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory input was empty.
    #[error("invalid request: {field} must not be empty")]
    Validation {
        /// Name of the offending input.
        field: &'static str,
    },

    /// The base URL and path could not be combined into a request URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The service returned a status other than 200.
    #[error("Festivo API error (HTTP {status}): {}", String::from_utf8_lossy(.body))]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Raw response body, byte for byte.
        body: Vec<u8>,
    },

    /// A 200 response body did not match the expected shape.
    #[error("failed to decode {target} (body: {preview}): {source}")]
    Decode {
        /// Rust type the body was decoded into.
        target: &'static str,
        /// Leading part of the body.
        preview: String,
        /// Underlying `serde_json` error (carries line and column).
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidUrl(_) => ErrorKind::Validation,
            Self::Network(_) => ErrorKind::Network,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status code, for `Transport` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, for `Transport` errors.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Transport { body, .. } => Some(body),
            _ => None,
        }
    }
}
