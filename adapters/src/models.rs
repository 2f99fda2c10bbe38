//! Data models shared by every store implementation.
//!
//! These models define the wire shape of person records and users, plus the
//! bookkeeping types (`Versioned`, `WriteOutcome`) that carry the
//! optimistic-concurrency protocol between the registry and a store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registry record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Eleven digits, no punctuation.
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, with = "serde_birth_date")]
    pub birth_date: Option<NaiveDateTime>,
}

impl Person {
    /// Case-insensitive comparison against a region code.
    pub fn in_region(&self, region: &str) -> bool {
        self.region
            .as_deref()
            .map_or(false, |r| r.to_lowercase() == region.to_lowercase())
    }
}

/// An authenticated user as handed out by a [`crate::CredentialStore`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl User {
    /// Copy of the user that is safe to put on the wire.
    pub fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// A stored value tagged with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Result of a conditional replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Updated(Person),
    /// No record with that id existed at write time.
    NotFound,
    /// The record changed since the expected version was read.
    Conflict,
}

/// Birth dates travel as `YYYY-MM-DDTHH:MM:SS`; a bare `YYYY-MM-DD` means midnight.
pub mod serde_birth_date {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(de::Error::custom)).transpose()
    }

    pub fn parse(s: &str) -> Result<NaiveDateTime, String> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::default()))
            })
            .map_err(|_| format!("invalid birth date '{}', expected YYYY-MM-DD[THH:MM:SS]", s))
    }
}
