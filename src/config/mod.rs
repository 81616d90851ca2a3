//! Configuration for SpokenPost

mod extraction;
mod logging;

pub use extraction::{
    ExtractionConfig, DEFAULT_ALLOWED_ATTRIBUTES, DEFAULT_AUTHOR_SELECTORS,
    DEFAULT_CONTENT_SELECTORS, DEFAULT_LOCATOR_NOISE_SELECTORS,
    DEFAULT_NORMALIZER_NOISE_SELECTORS,
};
pub use logging::{LogFormat, LogLevel, LoggingConfig};

use anyhow::Result;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extraction pipeline configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();
        let extraction = &self.extraction;

        for (key, selectors) in extraction.selector_lists() {
            if selectors.is_empty() {
                errors.push(format!("{} must not be empty", key));
            }
            for selector in selectors {
                if let Err(e) = Selector::parse(selector) {
                    errors.push(format!("{} contains invalid selector '{}': {:?}", key, selector, e));
                }
            }
        }

        if extraction.allowed_attributes.iter().any(|a| a.trim().is_empty()) {
            errors.push("allowed_attributes must not contain blank names".to_string());
        }

        if extraction.max_author_length == 0 {
            errors.push("max_author_length must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
