use crate::db::Database;
use crate::error::{CatalogError, Result};
use crate::models::Fixture;
use crate::utils::time_parser::parse_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a date range query. Absent fields deserialize as empty and are reported as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRangeRequest {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// A validated, inclusive time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Validate raw bounds: both present, both parseable, start not after end
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        if start.trim().is_empty() {
            return Err(CatalogError::MissingField("start"));
        }
        if end.trim().is_empty() {
            return Err(CatalogError::MissingField("end"));
        }

        let start =
            parse_time(start).map_err(|_| CatalogError::InvalidTimeFormat { field: "start" })?;
        let end = parse_time(end).map_err(|_| CatalogError::InvalidTimeFormat { field: "end" })?;

        if start > end {
            return Err(CatalogError::InvalidRange);
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Fixtures scheduled within `[start, end]`, ordered by time then id.
///
/// Nothing touches the store until both bounds have been validated.
pub async fn fixtures_in_range(db: &Database, start: &str, end: &str) -> Result<Vec<Fixture>> {
    let range = TimeRange::parse(start, end)?;
    let fixtures = db.fixtures_between(&range.start, &range.end).await?;
    tracing::debug!(
        "{} fixtures between {} and {}",
        fixtures.len(),
        range.start,
        range.end
    );
    Ok(fixtures)
}
