//! Pluggable HTTP transport.
//!
//! The client never talks to the network itself: it hands a plain-data
//! [`HttpRequest`] to a [`LocalTransport`] and gets back a fully drained
//! [`RawResponse`]. [`ReqwestTransport`] is the production implementation;
//! tests substitute their own.
#![allow(clippy::future_not_send)]

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::error::NetworkError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Fully qualified URL, query string included.
    pub url: Url,
    /// Header name/value pairs, in the order they were added.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a GET request for `url` with no headers.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first value of `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response whose body has been read to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Complete response body.
    pub body: Vec<u8>,
}

/// HTTP transport trait.
///
/// Implementations send the request, read the whole body whatever the
/// status, and release the connection before returning. Only failures to
/// exchange bytes with the server are errors; status codes are not.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Sends `request` and returns the drained response.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the server cannot be reached or the body
    /// cannot be read.
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, NetworkError>;
}

/// [`LocalTransport`] backed by `reqwest`.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the given User-Agent and optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the `reqwest::Client` cannot be built
    /// (e.g. TLS backend initialization fails).
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, NetworkError> {
        let mut builder = Client::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| NetworkError::new("failed to build HTTP client", e))?;
        Ok(Self { http_client })
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub const fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

impl LocalTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, NetworkError> {
        let mut builder = self.http_client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // `bytes()` consumes the response, so the connection goes back to the
        // pool (or is closed) on both the success and the error path.
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new("test/0.0.0", Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_header_value_is_case_insensitive() {
        // Arrange
        let request = HttpRequest::get(Url::parse("http://localhost/").unwrap())
            .header("Accept", "application/json");

        // Act & Assert
        assert_eq!(request.header_value("accept"), Some("application/json"));
        assert_eq!(request.header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_send_returns_body_and_headers_are_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v3/ping"))
            .and(wiremock::matchers::header("Accept", "application/json"))
            .and(wiremock::matchers::header("User-Agent", "test/0.0.0"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/v3/ping", mock_server.uri())).unwrap();
        let request = HttpRequest::get(url).header("Accept", "application/json");

        // Act
        let response = transport().send(&request).await.unwrap();

        // Assert
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"ok":true}"#.to_vec());
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri()).unwrap();

        // Act
        let response = transport().send(&HttpRequest::get(url)).await.unwrap();

        // Assert
        assert_eq!(response.status, 503);
        assert_eq!(response.body, b"maintenance".to_vec());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Arrange: grab a free port, then close it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/")).unwrap();

        // Act
        let result = transport().send(&HttpRequest::get(url)).await;

        // Assert
        let err = result.unwrap_err();
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let transport =
            ReqwestTransport::new("test/0.0.0", Some(Duration::from_millis(50))).unwrap();
        let url = Url::parse(&mock_server.uri()).unwrap();

        // Act
        let result = transport.send(&HttpRequest::get(url)).await;

        // Assert
        assert!(result.unwrap_err().is_timeout());
    }
}
