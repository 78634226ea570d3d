//! Festivo public holiday API client module.
//!
//! Wraps the `v3/public-holidays` endpoints: listing holidays for a
//! country and year (optionally scoped to a city or region) and checking
//! a single date.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{FestivoApi, LocalFestivoApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{API_KEY_ENV, FestivoClient, FestivoClientBuilder};
pub use types::{CheckHolidayResponse, Holiday, HolidayOptions, HolidaysResponse, RegionDetail};
