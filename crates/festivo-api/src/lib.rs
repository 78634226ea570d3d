//! API client library for the Festivo public holiday service.
//!
//! `rest` is a generic typed GET client (URL building, transport, status
//! handling, JSON decoding); `holidays` builds the Festivo calls on top of it.

/// Festivo holiday API client.
pub mod holidays;

/// Generic REST client core.
pub mod rest;

pub use holidays::{FestivoClient, LocalFestivoApi};
pub use rest::{Error, ErrorKind, Result};
