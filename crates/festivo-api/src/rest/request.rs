//! Request URL construction.

use std::collections::BTreeMap;

use url::Url;

use super::error::Result;

/// Query parameters for a single request.
///
/// Keys are unique and iterate in lexicographic order, so the same logical
/// parameter set always encodes to the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets `key` only when `value` is present and non-empty.
    pub fn insert_non_empty(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.insert(key, v);
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Builds the full request URL for `path` under `base_url`.
///
/// `path` is resolved beneath the base URL path, with or without a trailing
/// `/` on the base. Values are form-urlencoded; any string encodes.
///
/// # Errors
///
/// Returns `Error::InvalidUrl` if `path` cannot be joined onto `base_url`.
pub fn build_url(base_url: &Url, path: &str, params: &QueryParams) -> Result<Url> {
    let mut url = normalize_base_url(base_url.clone()).join(path.trim_start_matches('/'))?;
    url.set_query(None);
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.iter() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Appends `/` to the URL path unless already present.
pub(crate) fn normalize_base_url(mut url: Url) -> Url {
    if !url.cannot_be_a_base() && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
