//! `RestClient` - generic typed GET client.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::decode::decode;
use super::error::{Error, Result};
use super::request::{QueryParams, build_url, normalize_base_url};
use super::transport::{HttpRequest, LocalTransport};

/// Only status treated as success.
const STATUS_OK: u16 = 200;

/// Typed JSON-over-GET client.
///
/// Holds read-only configuration and a shared transport. Every call builds
/// its own request and buffer, so a single instance can serve concurrent
/// calls.
#[allow(clippy::module_name_repetitions)]
pub struct RestClient<T> {
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// Bearer credential; empty means unauthenticated.
    api_key: String,
    /// Injected transport.
    transport: Arc<T>,
}

impl<T> RestClient<T> {
    /// Creates a client.
    ///
    /// A trailing `/` is appended to the base URL path if missing so that
    /// request paths resolve beneath it.
    pub fn new(base_url: Url, api_key: impl Into<String>, transport: Arc<T>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            transport,
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Shared transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Builds the request for `url` with the standard headers.
    fn request_for(&self, url: Url) -> HttpRequest {
        let request = HttpRequest::get(url).header("Accept", "application/json");
        if self.api_key.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

impl<T: LocalTransport> RestClient<T> {
    /// Sends a GET for `url` and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// - `Error::Network` if the transport fails.
    /// - `Error::Transport` for any status other than 200.
    #[instrument(skip_all)]
    pub async fn execute(&self, url: Url) -> Result<Vec<u8>> {
        let request = self.request_for(url);
        tracing::debug!(url = %request.url, "Festivo API request");

        let response = self.transport.send(&request).await?;
        tracing::debug!(
            status = response.status,
            body_len = response.body.len(),
            "Festivo API response"
        );

        if response.status != STATUS_OK {
            return Err(Error::Transport {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    /// Sends a GET for `path` with `params` and decodes the JSON body into `R`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidUrl` if the URL cannot be built.
    /// - `Error::Network` / `Error::Transport` as for [`Self::execute`].
    /// - `Error::Decode` if the body does not match `R`.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<R> {
        let url = build_url(&self.base_url, path, params)?;
        let body = self.execute(url).await?;
        decode(&body)
    }
}

impl<T> Clone for RestClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for RestClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
