//! Serde helpers for UTC timestamps.
//!
//! Timestamps are written as RFC 3339 with exactly six fractional digits and a
//! `Z` suffix, so stored values compare correctly as plain strings.
//!
//! ```rust,ignore
//! #[serde(with = "crate::timestamp")]
//! pub created_at: DateTime<Utc>,
//! #[serde(with = "crate::timestamp::option", default)]
//! pub read_at: Option<DateTime<Utc>>,
//! ```

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// Drop the sub-microsecond part `format` would lose.
pub fn truncate(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

/// The current time at the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> { truncate(Utc::now()) }

pub fn format(dt: &DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
  let s = String::deserialize(deserializer)?;
  parse(&s).map_err(D::Error::custom)
}

pub mod option {
  use serde::de::Error as _;

  use super::*;

  pub fn serialize<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match dt {
      Some(dt) => serializer.serialize_some(&format(dt)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|s| parse(&s).map_err(D::Error::custom))
      .transpose()
  }
}
