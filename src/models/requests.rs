use serde::{Deserialize, Serialize};
use validator::Validate;

/// Parameters of one seed search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterConfig {
    #[validate(range(exclusive_min = 0.0))]
    pub max_minutes: f64,
    /// `None` accepts any match type; 2 is ranked
    pub match_type: Option<i64>,
    pub require_vod: bool,
    pub exclude_forfeit_decay: bool,
    #[validate(range(min = 1))]
    pub pages_to_try: u32,
    #[validate(range(min = 1, max = 100))]
    pub count_per_page: u32,
    #[validate(range(min = 1))]
    pub candidates_per_page: usize,
    #[serde(default)]
    pub preset: FilterPreset,
}

impl FilterConfig {
    /// Elapsed-time ceiling in milliseconds
    pub fn max_ms(&self) -> f64 {
        (self.max_minutes * 60_000.0).trunc()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_minutes: 10.0,
            match_type: Some(2),
            require_vod: true,
            exclude_forfeit_decay: true,
            pages_to_try: 50,
            count_per_page: 100,
            candidates_per_page: 100,
            preset: FilterPreset::Strict,
        }
    }
}

/// Which set of checks a candidate must pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FilterPreset {
    /// Type, forfeit/decay, elapsed time and VOD URL checks
    #[default]
    Strict,
    /// Type, elapsed time, VOD presence and player Elo bounds; forfeits are not inspected
    EloRange {
        min_elo: Option<f64>,
        max_elo: Option<f64>,
    },
}

/// How many verified matches a scan produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScanMode {
    #[default]
    FirstMatch,
    CollectAll { limit: Option<usize> },
}

/// How successive listing pages are requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pagination {
    /// `filter=2&page={n}`
    #[default]
    Page,
    /// `type={t}&before={last id}`
    Before,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_valid() {
        let filter = FilterConfig::default();
        assert!(filter.validate().is_ok());
        assert_eq!(filter.max_ms(), 600_000.0);
    }

    #[test]
    fn test_count_per_page_capped() {
        let filter = FilterConfig {
            count_per_page: 101,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let filter = FilterConfig {
            pages_to_try: 0,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }
}
