/*!
 * Tests for configuration loading and validation
 */

use std::time::Duration;

use anyhow::Result;
use log::LevelFilter;
use scripture_study::app_config::{Config, LogLevel};
use tempfile::TempDir;

#[test]
fn test_config_default_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.verses.primary.translations, vec!["kjv", "web", "bbe"]);
    assert_eq!(config.cache.ttl(), Duration::from_secs(3600));
    assert_eq!(config.cache.capacity, 1000);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{
        "verses": { "primary": { "translations": ["asv"] } },
        "cache": { "ttl_secs": 60 },
        "log_level": "debug"
    }"#)?;

    assert_eq!(config.verses.primary.translations, vec!["asv"]);
    assert_eq!(config.verses.primary.endpoint, "https://bible-api.com");
    assert!(config.verses.fallback.enabled);
    assert_eq!(config.cache.ttl_secs, 60);
    assert_eq!(config.cache.capacity, 1000);
    assert_eq!(config.log_level.to_level_filter(), LevelFilter::Debug);
    config.validate()
}

#[test]
fn test_config_validate_withNoTranslations_shouldFail() {
    let mut config = Config::default();
    config.verses.primary.translations.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    config.commentary.remote.endpoint = "not a url".to_string();
    let error = config.validate().unwrap_err().to_string();
    assert!(error.contains("commentary.remote"), "{}", error);
}

#[test]
fn test_config_validate_withDisabledRemote_shouldIgnoreItsEndpoint() {
    let mut config = Config::default();
    config.commentary.remote.enabled = false;
    config.commentary.remote.endpoint = String::new();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_withZeroCacheSettings_shouldFail() {
    let mut config = Config::default();
    config.cache.capacity = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.cache.ttl_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_cache_sweepInterval_shouldBeDisabledByZero() {
    let mut config = Config::default();
    assert_eq!(config.cache.sweep_interval(), Some(Duration::from_secs(300)));
    config.cache.sweep_interval_secs = 0;
    assert_eq!(config.cache.sweep_interval(), None);
}

#[test]
fn test_config_cache_build_shouldUseConfiguredBounds() {
    let mut config = Config::default();
    config.cache.capacity = 5;
    config.cache.ttl_secs = 42;

    let cache = config.cache.build();
    assert_eq!(cache.capacity(), 5);
    assert_eq!(cache.ttl(), Duration::from_secs(42));
}

#[test]
fn test_config_saveThenLoad_shouldPreserveValues() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.verses.primary.translations = vec!["web".to_string()];
    config.log_level = LogLevel::Warn;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.verses.primary.translations, vec!["web"]);
    assert_eq!(loaded.log_level, LogLevel::Warn);
    Ok(())
}

#[test]
fn test_config_load_withMissingFile_shouldFail() {
    let dir = TempDir::new().unwrap();
    assert!(Config::load(dir.path().join("missing.json")).is_err());
}
