//! Capture timestamps for records
//!
//! Records carry a local wall-clock stamp at second precision. On disk the
//! stamp is always written as `YYYY-MM-DD HH:MM:SS`.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serializer};

/// Text layout of a capture timestamp
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to whole seconds
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Formats a stamp using [`FORMAT`]
pub fn format(stamp: &NaiveDateTime) -> String {
    stamp.format(FORMAT).to_string()
}

/// Parses a stamp written with [`FORMAT`]
pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FORMAT)
}

pub fn serialize<S>(stamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(stamp))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(serde::de::Error::custom)
}
