use chrono::NaiveDate;
use log_indexer_shared::IndexName;

/// Routes log lines to daily indices under a fixed prefix.
#[derive(Debug, Clone)]
pub struct IndexRouter {
    prefix: String,
}

impl IndexRouter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Index for a line whose calendar date has already been resolved.
    pub fn route(&self, date: NaiveDate) -> IndexName {
        IndexName::for_date(&self.prefix, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route() {
        let router = IndexRouter::new("aws-waf-log");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(router.route(date).as_str(), "aws-waf-log-2024-1-5");
    }

    #[test]
    fn test_route_keeps_prefix_verbatim() {
        let router = IndexRouter::new("cloudfront-Logs");
        let date = NaiveDate::from_ymd_opt(2022, 11, 30).unwrap();
        assert_eq!(router.route(date).as_str(), "cloudfront-Logs-2022-11-30");
        assert_eq!(router.prefix(), "cloudfront-Logs");
    }
}
