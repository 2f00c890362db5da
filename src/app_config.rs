use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code the transcript was recognized in (e.g. "en-US", "de")
    #[serde(default = "default_language")]
    pub language: String,

    /// Subtitle layout config
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Display bounds for synthesized subtitle entries
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Maximum characters per subtitle line
    #[serde(default = "default_max_line_width")]
    pub max_line_width: usize,

    /// Maximum lines per subtitle entry
    #[serde(default = "default_max_lines_per_entry")]
    pub max_lines_per_entry: usize,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            max_line_width: default_max_line_width(),
            max_lines_per_entry: default_max_lines_per_entry(),
        }
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

fn default_language() -> String {
    "en-US".to_string()
}

fn default_max_line_width() -> usize {
    40
}

fn default_max_lines_per_entry() -> usize {
    2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the recognition language
        let _language_name = crate::language_utils::get_language_name(&self.language)?;

        if self.subtitle.max_line_width == 0 {
            return Err(anyhow!("max_line_width must be at least 1"));
        }

        if self.subtitle.max_lines_per_entry == 0 {
            return Err(anyhow!("max_lines_per_entry must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            subtitle: SubtitleConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
