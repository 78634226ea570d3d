//! Festivo API response types and request options.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Open-ended region detail object attached to a holiday.
///
/// The service does not fix its fields, so values stay as JSON values
/// (string, number, bool, null, object or array).
pub type RegionDetail = BTreeMap<String, serde_json::Value>;

// --- Holiday ---

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Holiday {
    /// Holiday date (YYYY-MM-DD).
    pub date: String,
    /// English name.
    pub name: String,
    /// Name in the local language.
    #[serde(default)]
    pub name_local: Option<String>,
    /// Classification (e.g., "public", "bank", "observance").
    #[serde(rename = "type", default)]
    pub holiday_type: String,
    /// Date the holiday is observed on (YYYY-MM-DD).
    #[serde(default)]
    pub observed: String,
    /// Whether this is a public (non-working) holiday.
    #[serde(default)]
    pub public: bool,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub country: String,
    /// Applicable subdivisions (ISO 3166-2).
    #[serde(default)]
    pub subdivisions: Vec<String>,
    /// Region details (city/regional plans only).
    #[serde(default)]
    pub regions: Option<Vec<RegionDetail>>,
}

// --- List ---

/// Response from `v3/public-holidays/list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HolidaysResponse {
    /// Holidays in the order returned by the service.
    pub holidays: Vec<Holiday>,
    /// Total number of holidays reported by the service.
    pub total: u32,
}

// --- Check ---

/// Response from `v3/public-holidays/check`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckHolidayResponse {
    /// Whether the date is a holiday.
    pub is_holiday: bool,
    /// The matching holiday, if any.
    #[serde(default)]
    pub holiday: Option<Holiday>,
}

// --- Options ---

/// Optional filters for holiday listing.
///
/// Empty strings are treated the same as unset and never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayOptions {
    /// Comma-separated region or city codes (e.g., "GB-SCT", "IT-MILAN").
    pub regions: Option<String>,
    /// Holiday type filter (e.g., "public").
    pub holiday_type: Option<String>,
    /// Language for localized names (e.g., "it").
    pub language: Option<String>,
    /// IANA timezone (e.g., "Europe/Rome").
    pub timezone: Option<String>,
}

impl HolidayOptions {
    /// Creates empty options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regions: None,
            holiday_type: None,
            language: None,
            timezone: None,
        }
    }

    /// Sets the region/city selector.
    #[must_use]
    pub fn regions(mut self, regions: impl Into<String>) -> Self {
        self.regions = Some(regions.into());
        self
    }

    /// Sets the holiday type filter.
    #[must_use]
    pub fn holiday_type(mut self, holiday_type: impl Into<String>) -> Self {
        self.holiday_type = Some(holiday_type.into());
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the timezone.
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}
