//! SpokenPost: article extraction for audio narration
//!
//! Turns an arbitrary web page into clean text ready for a text-to-speech
//! service:
//! - Locates the main article (readability, then selector heuristics)
//! - Strips scripts, navigation, ads, social widgets and comment sections
//! - Keeps only `href`/`src` attributes
//! - Rewrites headings as `[h2]...[/h2]` and lists as `• item` lines

pub mod config;
pub mod extractor;
pub mod types;

pub use config::Config;
pub use extractor::{
    ArticleContent, ArticlePipeline, ContentLocator, ExtractError, MarkupNormalizer,
    ProcessedArticle,
};
pub use types::*;
