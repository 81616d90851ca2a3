//! Content locator: finds the article inside a rendered page

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::primary::{PrimaryExtractor, ReadabilityExtractor};
use super::selectors::{compile_lenient, compile_strict};
use super::tree;
use super::types::{ArticleContent, ExtractError, ExtractionStrategy};
use crate::config::ExtractionConfig;

/// Locates the main article of a page.
///
/// The document is only ever borrowed; the fallback path works on its own
/// clone, so locating the same page twice gives the same answer.
pub struct ContentLocator {
    config: ExtractionConfig,
    primary: Option<Box<dyn PrimaryExtractor>>,
    /// Pre-compiled selectors for finding main content (in priority order)
    content_selectors: Vec<Selector>,
    author_selectors: Vec<Selector>,
    noise_selectors: Vec<Selector>,
}

impl ContentLocator {
    /// Create a locator, skipping configured selectors that fail to parse.
    pub fn new(config: ExtractionConfig) -> Self {
        let content_selectors = compile_lenient("content_selectors", &config.content_selectors);
        let author_selectors = compile_lenient("author_selectors", &config.author_selectors);
        let noise_selectors =
            compile_lenient("locator_noise_selectors", &config.locator_noise_selectors);
        Self::assemble(config, content_selectors, author_selectors, noise_selectors)
    }

    /// Create a locator, rejecting any configured selector that fails to parse.
    pub fn try_new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        let content_selectors = compile_strict("content_selectors", &config.content_selectors)?;
        let author_selectors = compile_strict("author_selectors", &config.author_selectors)?;
        let noise_selectors =
            compile_strict("locator_noise_selectors", &config.locator_noise_selectors)?;
        Ok(Self::assemble(config, content_selectors, author_selectors, noise_selectors))
    }

    fn assemble(
        config: ExtractionConfig,
        content_selectors: Vec<Selector>,
        author_selectors: Vec<Selector>,
        noise_selectors: Vec<Selector>,
    ) -> Self {
        let primary: Option<Box<dyn PrimaryExtractor>> = if config.use_readability {
            Some(Box::new(ReadabilityExtractor))
        } else {
            None
        };

        Self {
            config,
            primary,
            content_selectors,
            author_selectors,
            noise_selectors,
        }
    }

    /// Replace the primary extractor
    pub fn with_primary<E: PrimaryExtractor + 'static>(mut self, extractor: E) -> Self {
        self.primary = Some(Box::new(extractor));
        self
    }

    /// Use only the selector fallback
    pub fn without_primary(mut self) -> Self {
        self.primary = None;
        self
    }

    /// Locate the article: primary extractor first, selector fallback second.
    pub fn locate(&self, document: &Html, url: &Url) -> Result<ArticleContent, ExtractError> {
        if let Some(article) = self.locate_primary(document, url) {
            return Ok(article);
        }

        match self.locate_fallback(document) {
            Some(article) => Ok(article),
            None => {
                debug!("No content located for {}", url);
                Err(ExtractError::ExtractionFailed)
            }
        }
    }

    fn locate_primary(&self, document: &Html, url: &Url) -> Option<ArticleContent> {
        let extractor = self.primary.as_ref()?;

        let article = match extractor.extract(&document.html(), url) {
            Ok(article) => article,
            Err(e) => {
                warn!("{} extractor failed for {}: {:#}", extractor.name(), url, e);
                return None;
            }
        };
        if !article.is_usable() {
            debug!("{} extractor returned no usable content", extractor.name());
            return None;
        }

        let title = if article.title.is_empty() {
            self.extract_title(document)
        } else {
            article.title
        };
        let author = article.byline.or_else(|| self.extract_author(document));

        debug!("Located article with {} extractor", extractor.name());
        Some(ArticleContent {
            title,
            author,
            content: article.content,
            strategy: ExtractionStrategy::Readability,
        })
    }

    /// Selector-based fallback. Returns `None` when no container matches or
    /// the cleaned container has no text.
    pub fn locate_fallback(&self, document: &Html) -> Option<ArticleContent> {
        let container = self.find_container(document)?;

        let mut working = document.clone();
        let removed = tree::remove_noise(&mut working, container, &self.noise_selectors, true);
        let (headings, lists) = tree::convert_structure(&mut working, container);
        tree::restore_leading_newlines(&mut working, container);
        debug!(
            "Fallback container cleaned: {} noise elements, {} headings, {} lists",
            removed, headings, lists
        );

        let has_text = working
            .tree
            .get(container)
            .and_then(ElementRef::wrap)
            .map(|e| !tree::element_text(e).trim().is_empty())
            .unwrap_or(false);
        if !has_text {
            debug!("Fallback container has no text after cleanup");
            return None;
        }

        Some(ArticleContent {
            title: self.extract_title(document),
            author: self.extract_author(document),
            content: tree::inner_html(&working, container),
            strategy: ExtractionStrategy::Fallback,
        })
    }

    /// First element matching the content selectors, tried in priority order
    fn find_container(&self, document: &Html) -> Option<NodeId> {
        for selector in &self.content_selectors {
            if let Some(element) = document.select(selector).next() {
                return Some(element.id());
            }
        }
        debug!("No main content container matched");
        None
    }

    /// Title: first `h1`, then the document `<title>`
    pub(crate) fn extract_title(&self, document: &Html) -> String {
        for tag in ["h1", "title"] {
            if let Ok(selector) = Selector::parse(tag) {
                if let Some(elem) = document.select(&selector).next() {
                    let title = tree::element_text(elem).trim().to_string();
                    if !title.is_empty() {
                        return title;
                    }
                }
            }
        }
        String::new()
    }

    /// Author from the first matching byline element
    pub(crate) fn extract_author(&self, document: &Html) -> Option<String> {
        for selector in &self.author_selectors {
            if let Some(elem) = document.select(selector).next() {
                let text = tree::element_text(elem).trim().to_string();
                if !text.is_empty() && text.chars().count() <= self.config.max_author_length {
                    return Some(text);
                }
            }
        }
        None
    }
}

impl Default for ContentLocator {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
