//! Content location and markup normalization configuration

use serde::{Deserialize, Serialize};

/// Main-content containers, most specific first
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role='main']",
    "main",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content",
    "#content",
    ".post",
];

/// Elements whose text names the article author
pub const DEFAULT_AUTHOR_SELECTORS: &[&str] = &["[rel='author']", ".author", ".byline"];

/// Noise removed from the container picked by the fallback locator
pub const DEFAULT_LOCATOR_NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "iframe",
    "noscript",
    "nav",
    "footer",
    ".ad",
    ".advertisement",
    ".social-share",
    ".share",
    ".related",
    ".related-posts",
    ".comments",
];

/// Noise removed by the markup normalizer
pub const DEFAULT_NORMALIZER_NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "iframe",
    "noscript",
    "svg",
    "video",
    "button",
    "nav",
    "footer",
    ".ad",
    ".advertisement",
    ".social-share",
    ".comments",
    "[role='complementary']",
    "aside",
];

/// Attributes that survive normalization
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &["href", "src"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Extraction pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Try the readability extractor before the selector fallback
    pub use_readability: bool,
    /// Main-content selectors in priority order (first match wins)
    pub content_selectors: Vec<String>,
    /// Author selectors in priority order
    pub author_selectors: Vec<String>,
    /// Elements stripped from the fallback container
    pub locator_noise_selectors: Vec<String>,
    /// Elements stripped by the normalizer
    pub normalizer_noise_selectors: Vec<String>,
    /// Attribute names kept on surviving elements
    pub allowed_attributes: Vec<String>,
    /// Author candidates longer than this (in chars) are ignored
    pub max_author_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            use_readability: true,
            content_selectors: owned(DEFAULT_CONTENT_SELECTORS),
            author_selectors: owned(DEFAULT_AUTHOR_SELECTORS),
            locator_noise_selectors: owned(DEFAULT_LOCATOR_NOISE_SELECTORS),
            normalizer_noise_selectors: owned(DEFAULT_NORMALIZER_NOISE_SELECTORS),
            allowed_attributes: owned(DEFAULT_ALLOWED_ATTRIBUTES),
            max_author_length: 100,
        }
    }
}

impl ExtractionConfig {
    /// All selector lists paired with the config key they came from
    pub(crate) fn selector_lists(&self) -> [(&'static str, &[String]); 4] {
        [
            ("content_selectors", &self.content_selectors),
            ("author_selectors", &self.author_selectors),
            ("locator_noise_selectors", &self.locator_noise_selectors),
            ("normalizer_noise_selectors", &self.normalizer_noise_selectors),
        ]
    }
}
