//! Lenient date-of-birth parsing.
//!
//! Clients send `dob` either as a plain `YYYY-MM-DD` date or as a full
//! RFC 3339 timestamp (what a JS `Date` serializes to). Both collapse to the
//! calendar date so the (phone, dob) natural key compares reliably.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::errors::ModelError;

pub fn parse_dob(raw: &str) -> Result<NaiveDate, ModelError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::Validation(format!("invalid dob `{raw}`")))
}

/// `deserialize_with` helper for `Option<NaiveDate>` fields; empty strings are `None`.
pub fn deserialize_opt_dob<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_dob(s).map(Some).map_err(serde::de::Error::custom),
    }
}
