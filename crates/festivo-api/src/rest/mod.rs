//! Generic typed REST client core.
//!
//! Builds request URLs, sends GET requests through an injected transport,
//! classifies status codes, and decodes JSON bodies into caller-chosen
//! types. Knows nothing about holidays.

mod client;
mod decode;
mod error;
mod request;
mod transport;

#[allow(clippy::module_name_repetitions)]
pub use client::RestClient;
pub use decode::decode;
pub use error::{Error, ErrorKind, NetworkError, Result};
pub use request::{QueryParams, build_url};
pub use transport::{HttpRequest, LocalTransport, RawResponse, ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::testing;
