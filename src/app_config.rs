use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::study::cache::StudyCache;

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation providers
    #[serde(default)]
    pub verses: VersesConfig,

    /// Commentary providers
    #[serde(default)]
    pub commentary: CommentaryConfig,

    /// Shared lookup cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VersesConfig {
    #[serde(default)]
    pub primary: PrimaryVersesConfig,

    #[serde(default)]
    pub fallback: FallbackVersesConfig,
}

/// Primary provider: any reference, several translations
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrimaryVersesConfig {
    /// Service endpoint URL
    #[serde(default = "default_primary_endpoint")]
    pub endpoint: String,

    /// Translation codes requested for every reference
    #[serde(default = "default_translations")]
    pub translations: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrimaryVersesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_primary_endpoint(),
            translations: default_translations(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Secondary provider: one translation, whole chapters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FallbackVersesConfig {
    /// Whether to consult the fallback when every primary translation fails
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Service endpoint URL
    #[serde(default = "default_fallback_endpoint")]
    pub endpoint: String,

    /// Translation identifier sent to the service, also the result key
    #[serde(default = "default_fallback_translation")]
    pub translation: String,

    /// Label reported on fallback results
    #[serde(default = "default_fallback_label")]
    pub label: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FallbackVersesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_fallback_endpoint(),
            translation: default_fallback_translation(),
            label: default_fallback_label(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Commentary configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CommentaryConfig {
    #[serde(default)]
    pub remote: RemoteCommentaryConfig,
}

/// Remote commentary provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteCommentaryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Service endpoint URL
    #[serde(default = "default_commentary_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteCommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_commentary_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Lifetime of a cached upstream answer, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached entries
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Interval of the expired-entry sweep in seconds; 0 disables it
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Sweep interval, if the sweep is enabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }

    /// Build the cache shared by every fetcher
    pub fn build(&self) -> StudyCache {
        StudyCache::new(self.ttl(), self.capacity)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_primary_endpoint() -> String {
    "https://bible-api.com".to_string()
}

fn default_translations() -> Vec<String> {
    vec!["kjv".to_string(), "web".to_string(), "bbe".to_string()]
}

fn default_fallback_endpoint() -> String {
    // Self-hosted chapter service; see README for the expected response shape
    "http://localhost:8087/chapters".to_string()
}

fn default_fallback_translation() -> String {
    "kjv".to_string()
}

fn default_fallback_label() -> String {
    "KJV".to_string()
}

fn default_commentary_endpoint() -> String {
    "http://localhost:8088/commentary".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    60 * 60 // One hour
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl Config {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Write this configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let primary = &self.verses.primary;
        if primary.translations.is_empty() {
            return Err(anyhow!("At least one translation code is required"));
        }
        if primary.translations.iter().any(|code| code.trim().is_empty()) {
            return Err(anyhow!("Translation codes must not be blank"));
        }
        validate_endpoint("verses.primary", &primary.endpoint, primary.timeout_secs)?;

        let fallback = &self.verses.fallback;
        if fallback.enabled {
            validate_endpoint("verses.fallback", &fallback.endpoint, fallback.timeout_secs)?;
            if fallback.translation.trim().is_empty() {
                return Err(anyhow!("Fallback translation is required when the fallback is enabled"));
            }
        }

        let remote = &self.commentary.remote;
        if remote.enabled {
            validate_endpoint("commentary.remote", &remote.endpoint, remote.timeout_secs)?;
        }

        if self.cache.capacity == 0 {
            return Err(anyhow!("Cache capacity must be greater than zero"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(anyhow!("Cache TTL must be greater than zero"));
        }

        Ok(())
    }
}

fn validate_endpoint(section: &str, endpoint: &str, timeout_secs: u64) -> Result<()> {
    url::Url::parse(endpoint)
        .map_err(|e| anyhow!("Invalid {} endpoint '{}': {}", section, endpoint, e))?;
    if timeout_secs == 0 {
        return Err(anyhow!("{} timeout must be greater than zero", section));
    }
    Ok(())
}
