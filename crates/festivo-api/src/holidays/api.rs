//! `FestivoApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::rest::Result;

use super::types::{CheckHolidayResponse, HolidayOptions, HolidaysResponse};

/// Festivo public holiday API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FestivoApi: Send)]
pub trait LocalFestivoApi {
    /// Lists holidays for a country and year.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `country` is empty or `year` is 0,
    /// otherwise any transport or decode error from the request.
    async fn get_holidays(
        &self,
        country: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse>;

    /// Lists holidays for a city (e.g., `IT-MILAN`).
    ///
    /// Same as [`Self::get_holidays`] with `regions` set to `city_code`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `city_code` is empty, otherwise as
    /// [`Self::get_holidays`].
    async fn get_city_holidays(
        &self,
        country: &str,
        city_code: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse>;

    /// Lists holidays for an ISO 3166-2 region (e.g., `GB-SCT`).
    ///
    /// Same as [`Self::get_holidays`] with `regions` set to `region_code`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `region_code` is empty, otherwise as
    /// [`Self::get_holidays`].
    async fn get_regional_holidays(
        &self,
        country: &str,
        region_code: &str,
        year: u32,
        options: &HolidayOptions,
    ) -> Result<HolidaysResponse>;

    /// Checks whether `date` (YYYY-MM-DD) is a holiday.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `country` or `date` is empty,
    /// otherwise any transport or decode error from the request.
    async fn check_holiday(
        &self,
        country: &str,
        date: &str,
        regions: Option<&str>,
    ) -> Result<CheckHolidayResponse>;
}
