//! Shared types and constants for volume listing
//!
//! This module contains the volume summary record handed out by providers and
//! the page query passed to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of volumes requested from a provider per page
pub const DEFAULT_PAGE_SIZE: usize = 1024;

/// Date layout used for `createdOn`, e.g. `Mon, 05 Feb 2024 10:00:00 GMT`
pub const CREATED_ON_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Owning principal of a volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeOwner {
    pub name: String,
}

/// Unit a quota size is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuotaUnit {
    Bytes,
    Mb,
    Gb,
    Tb,
}

impl QuotaUnit {
    /// Number of bytes in one unit
    pub fn multiplier(&self) -> u64 {
        match self {
            QuotaUnit::Bytes => 1,
            QuotaUnit::Mb => 1 << 20,
            QuotaUnit::Gb => 1 << 30,
            QuotaUnit::Tb => 1 << 40,
        }
    }
}

/// Storage quota of a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub size: u64,
    pub unit: QuotaUnit,
}

impl Quota {
    pub fn new(size: u64, unit: QuotaUnit) -> Self {
        Self { size, unit }
    }

    /// Quota in bytes, saturating on overflow
    pub fn size_in_bytes(&self) -> u64 {
        self.size.saturating_mul(self.unit.multiplier())
    }
}

/// Summary of one listable volume
///
/// Produced by a provider and never mutated afterwards. Field names on the wire
/// are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub volume_name: String,
    pub owner: VolumeOwner,
    pub quota: Quota,
    #[serde(with = "created_on")]
    pub created_on: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_used: Option<u64>,
}

impl VolumeInfo {
    pub fn new(
        volume_name: impl Into<String>,
        owner: impl Into<String>,
        quota: Quota,
        created_on: DateTime<Utc>,
    ) -> Self {
        let owner = owner.into();
        Self {
            volume_name: volume_name.into(),
            created_by: owner.clone(),
            owner: VolumeOwner { name: owner },
            quota,
            created_on,
            bytes_used: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.volume_name
    }

    pub fn owner_name(&self) -> &str {
        &self.owner.name
    }
}

/// One page request sent to a provider
///
/// Providers answer with at most `max_keys` volumes whose names start with
/// `prefix` and sort strictly after `start_after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub prefix: Option<String>,
    pub start_after: Option<String>,
    pub max_keys: usize,
}

impl PageQuery {
    /// Whether `name` belongs on a page answering this query, ignoring `max_keys`
    pub fn admits(&self, name: &str) -> bool {
        let prefix_ok = self
            .prefix
            .as_deref()
            .is_none_or(|prefix| name.starts_with(prefix));
        let after_cursor = self
            .start_after
            .as_deref()
            .is_none_or(|cursor| name > cursor);
        prefix_ok && after_cursor
    }
}

mod created_on {
    use super::CREATED_ON_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(CREATED_ON_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, CREATED_ON_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
