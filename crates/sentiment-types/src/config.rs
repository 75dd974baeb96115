//! Configuration loading for sentiment-face.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/sentiment-face/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SentimentError;

/// Per-item weighting used by the aggregation engine.
///
/// `weight = (1 + engagement / engagement_scale)
///         * max(min_recency_weight, e^(-ln2 / half_life_hours * age_hours))
///         * confidence`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingConfig {
    /// Engagement points that add 1.0 to the engagement weight
    #[serde(default = "default_engagement_scale")]
    pub engagement_scale: f64,

    /// Half-life of the recency decay, in hours
    #[serde(default = "default_half_life_hours")]
    pub half_life_hours: f64,

    /// Lower bound for the recency weight
    #[serde(default = "default_min_recency_weight")]
    pub min_recency_weight: f64,
}

fn default_engagement_scale() -> f64 {
    1000.0
}

fn default_half_life_hours() -> f64 {
    24.0
}

fn default_min_recency_weight() -> f64 {
    0.1
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            engagement_scale: default_engagement_scale(),
            half_life_hours: default_half_life_hours(),
            min_recency_weight: default_min_recency_weight(),
        }
    }
}

impl WeightingConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.engagement_scale <= 0.0 {
            return Err(format!(
                "engagement_scale must be > 0, got {}",
                self.engagement_scale
            ));
        }
        if self.half_life_hours <= 0.0 {
            return Err(format!(
                "half_life_hours must be > 0, got {}",
                self.half_life_hours
            ));
        }
        if !(0.0..=1.0).contains(&self.min_recency_weight) {
            return Err(format!(
                "min_recency_weight must be 0.0-1.0, got {}",
                self.min_recency_weight
            ));
        }
        Ok(())
    }
}

/// Topic extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum token length (alphabetic run) considered a topic candidate
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    /// Minimum number of documents a topic must appear in
    #[serde(default = "default_min_document_count")]
    pub min_document_count: u32,

    /// Topics kept per aggregation pass
    #[serde(default = "default_topic_limit")]
    pub topic_limit: usize,

    /// Body characters used when an item has no title
    #[serde(default = "default_title_prefix_chars")]
    pub title_prefix_chars: usize,
}

fn default_min_token_len() -> usize {
    3
}

fn default_min_document_count() -> u32 {
    2
}

fn default_topic_limit() -> usize {
    10
}

fn default_title_prefix_chars() -> usize {
    crate::content::DEFAULT_TITLE_PREFIX_CHARS
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_token_len: default_min_token_len(),
            min_document_count: default_min_document_count(),
            topic_limit: default_topic_limit(),
            title_prefix_chars: default_title_prefix_chars(),
        }
    }
}

impl ExtractionConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_token_len == 0 {
            return Err("min_token_len must be > 0".to_string());
        }
        if self.min_document_count == 0 {
            return Err("min_document_count must be > 0".to_string());
        }
        Ok(())
    }
}

/// Defaults for trending-topic queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingConfig {
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,

    #[serde(default = "default_trending_limit")]
    pub limit: usize,
}

fn default_window_hours() -> i64 {
    1
}

fn default_trending_limit() -> usize {
    10
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            limit: default_trending_limit(),
        }
    }
}

/// Defaults for emotion-topic association queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationConfig {
    /// Number of most recent records scanned
    #[serde(default = "default_recent_records")]
    pub recent_records: usize,

    /// Minimum emotion value for a record to count toward that emotion
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f64,

    /// Topics returned per emotion
    #[serde(default = "default_top_topics")]
    pub top_topics: usize,
}

fn default_recent_records() -> usize {
    50
}

fn default_activation_threshold() -> f64 {
    0.01
}

fn default_top_topics() -> usize {
    5
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            recent_records: default_recent_records(),
            activation_threshold: default_activation_threshold(),
            top_topics: default_top_topics(),
        }
    }
}

/// Topic search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Extracted topics stored after the query entry in history
    #[serde(default = "default_related_topics")]
    pub related_topics: usize,

    /// Extracted topics returned to the caller
    #[serde(default = "default_response_topics")]
    pub response_topics: usize,
}

fn default_related_topics() -> usize {
    5
}

fn default_response_topics() -> usize {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            related_topics: default_related_topics(),
            response_topics: default_response_topics(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the JSON history snapshot
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Maximum records kept in history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub weighting: WeightingConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub trending: TrendingConfig,

    #[serde(default)]
    pub associations: AssociationConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Default history capacity.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

fn default_history_path() -> String {
    ProjectDirs::from("", "", "sentiment-face")
        .map(|p| p.data_local_dir().join("sentiment_history.json"))
        .unwrap_or_else(|| PathBuf::from("./data/sentiment_history.json"))
        .to_string_lossy()
        .to_string()
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            history_capacity: default_history_capacity(),
            log_level: default_log_level(),
            weighting: WeightingConfig::default(),
            extraction: ExtractionConfig::default(),
            trending: TrendingConfig::default(),
            associations: AssociationConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/sentiment-face/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (SENTIMENT_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, SentimentError> {
        let config_dir = ProjectDirs::from("", "", "sentiment-face")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("history_path", default_history_path())
            .map_err(|e| SentimentError::Config(e.to_string()))?
            .set_default("history_capacity", default_history_capacity() as i64)
            .map_err(|e| SentimentError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| SentimentError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: SENTIMENT_HISTORY_PATH, SENTIMENT_LOG_LEVEL, SENTIMENT_WEIGHTING__HALF_LIFE_HOURS
        builder = builder.add_source(
            Environment::with_prefix("SENTIMENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| SentimentError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| SentimentError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), SentimentError> {
        if self.history_capacity == 0 {
            return Err(SentimentError::Config(
                "history_capacity must be > 0".to_string(),
            ));
        }
        self.weighting.validate().map_err(SentimentError::Config)?;
        self.extraction.validate().map_err(SentimentError::Config)?;
        if !(0.0..=1.0).contains(&self.associations.activation_threshold) {
            return Err(SentimentError::Config(format!(
                "activation_threshold must be 0.0-1.0, got {}",
                self.associations.activation_threshold
            )));
        }
        Ok(())
    }

    /// Expand ~ in history_path to the home directory
    pub fn expanded_history_path(&self) -> PathBuf {
        if let Some(rest) = self.history_path.strip_prefix("~/") {
            if let Some(dirs) = directories::BaseDirs::new() {
                return dirs.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.history_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.history_capacity, 1000);
        assert_eq!(settings.log_level, "info");
        assert!(settings.history_path.ends_with("sentiment_history.json"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.extraction.topic_limit, 10);
    }

    #[test]
    fn test_weighting_defaults() {
        let config = WeightingConfig::default();
        assert!((config.engagement_scale - 1000.0).abs() < f64::EPSILON);
        assert!((config.half_life_hours - 24.0).abs() < f64::EPSILON);
        assert!((config.min_recency_weight - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighting_validation() {
        let mut config = WeightingConfig::default();
        assert!(config.validate().is_ok());

        config.half_life_hours = 0.0;
        assert!(config.validate().is_err());

        config.half_life_hours = 24.0;
        config.min_recency_weight = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let trending = TrendingConfig::default();
        assert_eq!(trending.window_hours, 1);
        assert_eq!(trending.limit, 10);

        let associations = AssociationConfig::default();
        assert_eq!(associations.recent_records, 50);
        assert!((associations.activation_threshold - 0.01).abs() < f64::EPSILON);
        assert_eq!(associations.top_topics, 5);

        let search = SearchConfig::default();
        assert_eq!(search.related_topics, 5);
    }

    #[test]
    fn test_partial_toml_section_uses_field_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"extraction": {"topic_limit": 3}}"#).unwrap();
        assert_eq!(settings.extraction.topic_limit, 3);
        assert_eq!(settings.extraction.min_document_count, 2);
        assert_eq!(settings.history_capacity, 1000);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let settings = Settings {
            history_capacity: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_expanded_history_path_plain() {
        let settings = Settings {
            history_path: "/tmp/history.json".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.expanded_history_path(),
            PathBuf::from("/tmp/history.json")
        );
    }
}
