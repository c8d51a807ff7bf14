//! Deserializers for the loosely-typed shapes the backend sends.
//!
//! Ids arrive as strings or integers, money as strings or JSON numbers, and
//! dates either as `YYYY-MM-DD` or as full RFC 3339 timestamps. Everything is
//! normalized here so the rest of the crate only sees canonical types.
//! Foreign keys are written back as bare ids.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error};

use super::Reference;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Above the 100 digits a decimal division produces, so exact percentages
/// echoed back by the allocation editor still parse.
const MAX_DECIMAL_SCALE: i64 = 128;
/// Roughly 150 significant digits.
const MAX_DECIMAL_BITS: u64 = 512;

impl RawNumber {
    fn into_decimal(self) -> Result<BigDecimal, String> {
        let decimal = match self {
            RawNumber::Text(text) if text.trim().is_empty() => return Ok(BigDecimal::default()),
            RawNumber::Text(text) => BigDecimal::from_str(text.trim())
                .map_err(|e| format!("invalid decimal '{}': {}", text, e))?,
            RawNumber::Integer(value) => BigDecimal::from(value),
            // Shortest round-trip representation, so 0.1 stays 0.1
            RawNumber::Float(value) => BigDecimal::from_str(&value.to_string())
                .map_err(|e| format!("invalid decimal '{}': {}", value, e))?,
        };
        within_bounds(decimal)
    }
}

/// Rejects exponents that would blow up into millions of digits once the
/// value is aligned with another operand.
fn within_bounds(decimal: BigDecimal) -> Result<BigDecimal, String> {
    let (digits, scale) = decimal.as_bigint_and_exponent();
    if scale.abs() > MAX_DECIMAL_SCALE {
        return Err(format!("decimal out of range: exponent {}", -scale));
    }
    if digits.bits() > MAX_DECIMAL_BITS {
        return Err("decimal out of range: too many digits".to_string());
    }
    Ok(decimal)
}

pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn id_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

pub(crate) fn optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Missing, null and blank amounts all count as zero.
pub(crate) fn decimal_or_zero<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BigDecimal, D::Error> {
    match Option::<RawNumber>::deserialize(deserializer)? {
        Some(raw) => raw.into_decimal().map_err(D::Error::custom),
        None => Ok(BigDecimal::default()),
    }
}

pub(crate) fn optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BigDecimal>, D::Error> {
    match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(raw) => raw.into_decimal().map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
}

pub(crate) fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
}

/// Unparsable optional dates are treated as absent rather than failing the record.
pub(crate) fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(parse_date))
}

pub(crate) fn optional_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(parse_datetime))
}

/// Foreign keys go back to the backend as bare ids.
pub(crate) fn reference_id<S: Serializer>(
    reference: &Reference,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&reference.id)
}

pub(crate) fn optional_reference_id<S: Serializer>(
    reference: &Option<Reference>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match reference {
        Some(reference) => serializer.serialize_some(&reference.id),
        None => serializer.serialize_none(),
    }
}

/// Query-string helper: `?status=` means "unset", not "status equals empty".
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}
