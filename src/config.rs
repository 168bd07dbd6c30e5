use crate::models::{FilterConfig, FilterPreset, Pagination, ScanMode};
use crate::services::{DEFAULT_BASES, DEFAULT_TIMEOUT_SECS};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApiSettings {
    #[validate(length(min = 1))]
    #[serde(default = "default_bases")]
    pub bases: Vec<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bases: default_bases(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bases() -> Vec<String> {
    DEFAULT_BASES.iter().map(|b| b.to_string()).collect()
}
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

#[derive(Debug, Clone, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_max_minutes")]
    pub max_minutes: f64,
    /// Integer match type, or "any"
    #[serde(default = "default_match_type")]
    pub match_type: String,
    #[serde(default = "default_true")]
    pub require_vod: bool,
    #[serde(default = "default_true")]
    pub exclude_forfeit_decay: bool,
    /// "strict" or "elo_range"
    #[serde(default = "default_preset")]
    pub preset: String,
    pub min_elo: Option<f64>,
    pub max_elo: Option<f64>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_minutes: default_max_minutes(),
            match_type: default_match_type(),
            require_vod: true,
            exclude_forfeit_decay: true,
            preset: default_preset(),
            min_elo: None,
            max_elo: None,
        }
    }
}

fn default_max_minutes() -> f64 { 10.0 }
fn default_match_type() -> String { "2".to_string() }
fn default_preset() -> String { "strict".to_string() }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_pages_to_try")]
    pub pages_to_try: u32,
    #[serde(default = "default_count_per_page")]
    pub count_per_page: u32,
    #[serde(default = "default_candidates_per_page")]
    pub candidates_per_page: usize,
    /// "first_match" or "collect_all"
    #[serde(default = "default_mode")]
    pub mode: String,
    pub collect_limit: Option<usize>,
    #[serde(default)]
    pub pagination: Pagination,
    pub rng_seed: Option<u64>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            pages_to_try: default_pages_to_try(),
            count_per_page: default_count_per_page(),
            candidates_per_page: default_candidates_per_page(),
            mode: default_mode(),
            collect_limit: None,
            pagination: Pagination::default(),
            rng_seed: None,
        }
    }
}

fn default_pages_to_try() -> u32 { 50 }
fn default_count_per_page() -> u32 { 100 }
fn default_candidates_per_page() -> usize { 100 }
fn default_mode() -> String { "first_match".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    /// Print match id, players, times and VOD after the seeds
    #[serde(default)]
    pub reveal: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SEEDFIND_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SEEDFIND__FILTER__MAX_MINUTES -> filter.max_minutes
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Per-request timeout, rejecting a zero value
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        self.api
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid api settings: {}", e)))?;

        Ok(Duration::from_secs(self.api.timeout_secs))
    }

    /// Validated filter parameters for a search
    pub fn filter_config(&self) -> Result<FilterConfig, ConfigError> {
        let preset = match self.filter.preset.as_str() {
            "strict" => FilterPreset::Strict,
            "elo_range" => FilterPreset::EloRange {
                min_elo: self.filter.min_elo,
                max_elo: self.filter.max_elo,
            },
            other => {
                return Err(ConfigError::Message(format!("unknown filter preset: {}", other)));
            }
        };

        let filter = FilterConfig {
            max_minutes: self.filter.max_minutes,
            match_type: parse_match_type(&self.filter.match_type)?,
            require_vod: self.filter.require_vod,
            exclude_forfeit_decay: self.filter.exclude_forfeit_decay,
            pages_to_try: self.scan.pages_to_try,
            count_per_page: self.scan.count_per_page,
            candidates_per_page: self.scan.candidates_per_page,
            preset,
        };

        filter
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid filter: {}", e)))?;

        Ok(filter)
    }

    pub fn scan_mode(&self) -> Result<ScanMode, ConfigError> {
        match self.scan.mode.as_str() {
            "first_match" => Ok(ScanMode::FirstMatch),
            "collect_all" => Ok(ScanMode::CollectAll {
                limit: self.scan.collect_limit,
            }),
            other => Err(ConfigError::Message(format!("unknown scan mode: {}", other))),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SEEDFIND")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("api.bases")
}

fn parse_match_type(value: &str) -> Result<Option<i64>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("any") || value.is_empty() {
        return Ok(None);
    }

    value
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Message(format!("invalid match type: {}", value)))
}
