//! Article extraction for narration
//!
//! Two stages run in sequence:
//! - [`ContentLocator`] finds the article in a page (readability first,
//!   selector fallback second) without touching the caller's document
//! - [`MarkupNormalizer`] strips noise and attributes from the article HTML
//!   and rewrites headings and lists into inline markers
//!
//! Both stages share the marker syntax in [`markers`], so text that already
//! went through the fallback locator passes through the normalizer intact.

pub mod markers;

mod locator;
mod normalizer;
mod primary;
mod selectors;
mod tree;
mod types;

pub use locator::ContentLocator;
pub use normalizer::MarkupNormalizer;
pub use primary::{PrimaryArticle, PrimaryExtractor, ReadabilityExtractor};
pub use types::*;

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::config::ExtractionConfig;

/// Locator and normalizer composed into one call
pub struct ArticlePipeline {
    locator: ContentLocator,
    normalizer: MarkupNormalizer,
}

impl ArticlePipeline {
    /// Create a pipeline, skipping configured selectors that fail to parse.
    pub fn new(config: ExtractionConfig) -> Self {
        let normalizer = MarkupNormalizer::new(&config);
        Self {
            locator: ContentLocator::new(config),
            normalizer,
        }
    }

    /// Build from explicitly constructed stages
    pub fn from_parts(locator: ContentLocator, normalizer: MarkupNormalizer) -> Self {
        Self { locator, normalizer }
    }

    pub fn locator(&self) -> &ContentLocator {
        &self.locator
    }

    pub fn normalizer(&self) -> &MarkupNormalizer {
        &self.normalizer
    }

    /// Locate the article in `document` and normalize its content.
    pub fn run(&self, document: &Html, url: &Url) -> Result<ProcessedArticle, ExtractError> {
        let article = self.locator.locate(document, url)?;
        let text = self.normalizer.normalize(&article.content);
        if text.is_empty() {
            debug!("Article from {} normalized to nothing", article.strategy.as_str());
            return Err(ExtractError::ExtractionFailed);
        }

        Ok(ProcessedArticle {
            title: article.title,
            author: article.author,
            text,
            strategy: article.strategy,
        })
    }

    /// Parse a full page and run the pipeline on it
    pub fn run_html(&self, html: &str, url: &Url) -> Result<ProcessedArticle, ExtractError> {
        let document = Html::parse_document(html);
        self.run(&document, url)
    }
}

impl Default for ArticlePipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
