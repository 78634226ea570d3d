//! JSON body decoding.

use serde::de::DeserializeOwned;

use super::error::{Error, Result};

/// Maximum number of body bytes quoted in a decode error.
const PREVIEW_LEN: usize = 500;

/// Decodes a drained response body into `T`.
///
/// Unknown fields are ignored; missing fields fall back to whatever `T`
/// declares as its default.
///
/// # Errors
///
/// Returns `Error::Decode` if the body is not valid JSON, is truncated, or
/// does not match the shape of `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        target: std::any::type_name::<T>(),
        preview: preview(body),
        source,
    })
}

/// Lossy UTF-8 rendering of the first `PREVIEW_LEN` bytes of `body`.
fn preview(body: &[u8]) -> String {
    let head = body.get(..PREVIEW_LEN).unwrap_or(body);
    let mut text = String::from_utf8_lossy(head).into_owned();
    if body.len() > PREVIEW_LEN {
        text.push('…');
    }
    text
}
