//! `FestivoClient` - Festivo API client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;
use url::Url;

use super::api::LocalFestivoApi;
use super::types::{CheckHolidayResponse, HolidayOptions, HolidaysResponse};
use crate::rest::{Error, LocalTransport, QueryParams, ReqwestTransport, RestClient, Result};

/// Default base URL for the Festivo API.
const DEFAULT_BASE_URL: &str = "https://api.getfestivo.com/";

/// Environment variable the API key is read from by [`FestivoClientBuilder::from_env`].
pub const API_KEY_ENV: &str = "FESTIVO_KEY";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("festivo-rs/", env!("CARGO_PKG_VERSION"));

/// Holiday listing endpoint.
const LIST_PATH: &str = "v3/public-holidays/list";

/// Single-date check endpoint.
const CHECK_PATH: &str = "v3/public-holidays/check";

/// Festivo API client.
#[allow(clippy::module_name_repetitions)]
pub struct FestivoClient<T = ReqwestTransport> {
    /// Typed REST core.
    rest: RestClient<T>,
}

/// Builder for `FestivoClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct FestivoClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl FestivoClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Creates a builder with the API key taken from `FESTIVO_KEY`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        builder.api_key = std::env::var(API_KEY_ENV).ok();
        builder
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token. An empty token disables authentication.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent of the default transport.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout of the default transport (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client with a `reqwest` transport.
    ///
    /// # Errors
    ///
    /// - The base URL cannot be used as a base.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<FestivoClient> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(user_agent, self.timeout)?;
        self.build_with_transport(Arc::new(transport))
    }

    /// Builds the client on top of a caller-supplied transport.
    ///
    /// `user_agent` and `timeout` are ignored; they only configure the
    /// default transport.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the base URL cannot be used as a base.
    pub fn build_with_transport<T>(self, transport: Arc<T>) -> Result<FestivoClient<T>> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)?
        };
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(FestivoClient {
            rest: RestClient::new(base_url, self.api_key.unwrap_or_default(), transport),
        })
    }
}

impl FestivoClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FestivoClientBuilder {
        FestivoClientBuilder::new()
    }
}

impl<T> FestivoClient<T> {
    /// Underlying REST core.
    #[must_use]
    pub const fn rest(&self) -> &RestClient<T> {
        &self.rest
    }
}

impl<T> Clone for FestivoClient<T> {
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
        }
    }
}

impl<T> fmt::Debug for FestivoClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FestivoClient")
            .field("rest", &self.rest)
            .finish()
    }
}

/// Rejects blank mandatory inputs.
fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation { field });
    }
    Ok(())
}

/// Builds the query for the listing endpoint.
fn holidays_query(
    country: &str,
    year: u32,
    options: &HolidayOptions,
) -> Result<QueryParams> {
    require("country", country)?;
    if year == 0 {
        return Err(Error::Validation { field: "year" });
    }

    let mut query = QueryParams::new();
    query.insert("country", country);
    query.insert("year", year.to_string());
    query.insert_non_empty("regions", options.regions.as_deref());
    query.insert_non_empty("type", options.holiday_type.as_deref());
    query.insert_non_empty("language", options.language.as_deref());
    query.insert_non_empty("timezone", options.timezone.as_deref());
    Ok(query)
}

/// Builds the query for the check endpoint.
fn check_query(country: &str, date: &str, regions: Option<&str>) -> Result<QueryParams> {
    require("country", country)?;
    require("date", date)?;

    let mut query = QueryParams::new();
    query.insert("country", country);
    query.insert("date", date);
    query.insert_non_empty("regions", regions);
    Ok(query)
}

/// Copies `options` with the region selector replaced by `code`.
fn with_region(options: &HolidayOptions, code: &str) -> HolidayOptions {
    HolidayOptions {
        regions: Some(String::from(code)),
        ..options.clone()
    }
}

impl<T: LocalTransport> LocalFestivoApi for FestivoClient<T> {
    #[instrument(skip_all, fields(country = %country, year = year))]
    async fn get_holidays(
        &self,
        country: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse> {
        let query = holidays_query(country, year, options)?;
        self.rest.get_json(LIST_PATH, &query).await
    }

    #[instrument(skip_all, fields(country = %country, city_code = %city_code))]
    async fn get_city_holidays(
        &self,
        country: &str,
        city_code: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse> {
        require("city_code", city_code)?;
        self.get_holidays(country, year, &with_region(options, city_code))
            .await
    }

    #[instrument(skip_all, fields(country = %country, region_code = %region_code))]
    async fn get_regional_holidays(
        &self,
        country: &str,
        region_code: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse> {
        require("region_code", region_code)?;
        self.get_holidays(country, year, &with_region(options, region_code))
            .await
    }

    #[instrument(skip_all, fields(country = %country, date = %date))]
    async fn check_holiday(
        &self,
        country: &str,
        date: &str,
        regions: Option<&str>,
    ) -> Result<CheckHolidayResponse> {
        let query = check_query(country, date, regions)?;
        self.rest.get_json(CHECK_PATH, &query).await
    }
}
