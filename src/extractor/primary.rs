//! Primary (readability) extraction strategy

use anyhow::{Context, Result};
use std::io::Cursor;
use url::Url;

/// Output of a primary extractor
#[derive(Debug, Clone, Default)]
pub struct PrimaryArticle {
    pub title: String,
    /// Article body as HTML
    pub content: String,
    /// Article body as plain text
    pub text: String,
    pub byline: Option<String>,
}

impl PrimaryArticle {
    /// Whether the extractor found anything worth keeping
    pub fn is_usable(&self) -> bool {
        !self.content.trim().is_empty() && !self.text.trim().is_empty()
    }
}

/// A high-quality extractor tried before the selector fallback.
///
/// Implementations receive a serialized copy of the page and must not have
/// any other way to reach the caller's document.
pub trait PrimaryExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, html: &str, url: &Url) -> Result<PrimaryArticle>;
}

/// Primary extractor backed by Mozilla's readability algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadabilityExtractor;

impl PrimaryExtractor for ReadabilityExtractor {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn extract(&self, html: &str, url: &Url) -> Result<PrimaryArticle> {
        let mut cursor = Cursor::new(html.as_bytes());
        let product = readability::extractor::extract(&mut cursor, url)
            .context("Failed to extract readable content from HTML")?;

        // readability does not report a byline
        Ok(PrimaryArticle {
            title: product.title.trim().to_string(),
            content: product.content,
            text: product.text,
            byline: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readability_extracts_article_body() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head><title>Test Article</title></head>
            <body>
                <nav>Navigation here</nav>
                <article>
                    <h1>Main Article Title</h1>
                    <p>This is the main content of the article. It contains important information
                    that should be extracted by the readability algorithm, with enough words to
                    count as a real paragraph of prose.</p>
                    <p>Here is another paragraph with more content to ensure proper extraction,
                    because short fragments are discarded as boilerplate by the scorer.</p>
                </article>
                <footer>Footer content here</footer>
            </body>
            </html>
        "#;

        let url = Url::parse("https://example.com/article").unwrap();
        let article = ReadabilityExtractor.extract(html, &url).unwrap();
        assert!(article.is_usable());
        assert!(article.text.contains("main content of the article"));
        assert!(article.byline.is_none());
    }

    #[test]
    fn blank_article_is_not_usable() {
        let article = PrimaryArticle {
            content: "<div> </div>".to_string(),
            text: "   ".to_string(),
            ..Default::default()
        };
        assert!(!article.is_usable());
    }
}
