//! Serde helpers for wall-clock times stored as `"HH:MM"` strings.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%H:%M";

pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(raw.trim(), FORMAT)
}

pub fn format(time: &NaiveTime) -> String {
    time.format(FORMAT).to_string()
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(time))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
