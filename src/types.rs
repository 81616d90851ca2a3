//! Payload types exchanged with the audio conversion service
//!
//! Only the wire shapes live here; the HTTP transport belongs to the caller,
//! which constructs and owns whatever client it uses.

use serde::{Deserialize, Serialize};

use crate::extractor::ProcessedArticle;

/// Body of a conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Page the article came from
    pub url: String,
    /// Normalized, marker-annotated article text
    pub article_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ConversionRequest {
    pub fn new(url: impl Into<String>, article_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            article_text: article_text.into(),
            title: String::new(),
            author: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl ProcessedArticle {
    /// Build the conversion request for this article
    pub fn into_request(self, url: &url::Url) -> ConversionRequest {
        ConversionRequest {
            url: url.to_string(),
            article_text: self.text,
            title: self.title,
            author: self.author,
        }
    }
}

/// Response to a conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub audio_url: String,
}

/// Converted article as reported by the check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedArticle {
    pub audio_url: String,
}

/// Response to an "is this URL already converted" check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub exists: bool,
    #[serde(default)]
    pub article: Option<ConvertedArticle>,
}

impl CheckResponse {
    /// Audio location when the article has already been converted
    pub fn audio_url(&self) -> Option<&str> {
        if !self.exists {
            return None;
        }
        self.article.as_ref().map(|a| a.audio_url.as_str())
    }
}
