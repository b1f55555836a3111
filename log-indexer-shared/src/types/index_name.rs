//! Date-partitioned index names.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Name of a daily index: `{prefix}-{year}-{month}-{day}`.
///
/// Month and day are rendered without zero padding (`aws-waf-log-2024-1-5`).
/// Existing indices and their index patterns rely on this exact shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexName(String);

impl IndexName {
    /// Build the index name for `date` under `prefix`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use log_indexer_shared::IndexName;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    /// assert_eq!(IndexName::for_date("aws-waf-log", date).as_str(), "aws-waf-log-2024-1-5");
    /// ```
    pub fn for_date(prefix: &str, date: NaiveDate) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            prefix,
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
