//! Content extraction types

use thiserror::Error;

/// Errors during content extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Neither the primary extractor nor the selector fallback found content
    #[error("No article content could be located")]
    ExtractionFailed,
    #[error("Invalid selector in {list}: '{selector}'")]
    InvalidSelector { list: &'static str, selector: String },
}

/// Which strategy produced an [`ArticleContent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Readability-style primary extractor
    Readability,
    /// Selector-based fallback locator
    Fallback,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readability => "readability",
            Self::Fallback => "fallback",
        }
    }
}

/// Article located in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Article title (may be empty when the page has none)
    pub title: String,
    /// Author byline
    pub author: Option<String>,
    /// Main content as an HTML fragment
    pub content: String,
    pub strategy: ExtractionStrategy,
}

/// Article after normalization, ready to hand to the conversion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedArticle {
    pub title: String,
    pub author: Option<String>,
    /// Normalized, marker-annotated text
    pub text: String,
    pub strategy: ExtractionStrategy,
}
