//! Markup normalizer: HTML fragment to marker-annotated text

use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

use super::selectors::{compile_lenient, compile_strict};
use super::tree;
use super::types::ExtractError;
use crate::config::ExtractionConfig;

// Lazy-compiled cleanup patterns
static RE_EMPTY_ELEMENT: OnceLock<Regex> = OnceLock::new();
static RE_BLANK_LINES: OnceLock<Regex> = OnceLock::new();
static RE_COMMENT: OnceLock<Regex> = OnceLock::new();

fn empty_element_re() -> &'static Regex {
    RE_EMPTY_ELEMENT.get_or_init(|| {
        Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^>]*)?>\s*</([a-zA-Z][a-zA-Z0-9-]*)\s*>")
            .expect("hardcoded regex is valid")
    })
}

fn blank_lines_re() -> &'static Regex {
    RE_BLANK_LINES.get_or_init(|| Regex::new(r"\n\s*\n\s*\n").expect("hardcoded regex is valid"))
}

fn comment_re() -> &'static Regex {
    RE_COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("hardcoded regex is valid"))
}

/// Turns an untrusted HTML fragment into clean text with heading and list
/// markers. Never fails; unexpected input just matches fewer rules.
pub struct MarkupNormalizer {
    noise_selectors: Vec<Selector>,
    allowed_attributes: Vec<String>,
}

impl MarkupNormalizer {
    /// Create a normalizer, skipping configured selectors that fail to parse.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            noise_selectors: compile_lenient(
                "normalizer_noise_selectors",
                &config.normalizer_noise_selectors,
            ),
            allowed_attributes: config.allowed_attributes.clone(),
        }
    }

    /// Create a normalizer, rejecting any configured selector that fails to parse.
    pub fn try_new(config: &ExtractionConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            noise_selectors: compile_strict(
                "normalizer_noise_selectors",
                &config.normalizer_noise_selectors,
            )?,
            allowed_attributes: config.allowed_attributes.clone(),
        })
    }

    /// Normalize an HTML fragment.
    ///
    /// Tree passes run on a private parse: noise removal, attribute
    /// stripping, heading markers, list flattening. The serialized result
    /// then gets the textual cleanup passes.
    pub fn normalize(&self, html: &str) -> String {
        if html.trim().is_empty() {
            return String::new();
        }

        let mut fragment = Html::parse_fragment(html);
        let root = fragment.root_element().id();

        let removed = tree::remove_noise(&mut fragment, root, &self.noise_selectors, true);
        let stripped = tree::retain_attributes(&mut fragment, root, &self.allowed_attributes);
        let (headings, lists) = tree::convert_structure(&mut fragment, root);
        debug!(
            "Normalized fragment: {} noise elements, {} attributes, {} headings, {} lists",
            removed, stripped, headings, lists
        );

        tree::restore_leading_newlines(&mut fragment, root);

        cleanup(&tree::inner_html(&fragment, root))
    }
}

impl Default for MarkupNormalizer {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Textual passes over serialized markup, in order: empty elements, blank
/// line runs, comments, outer whitespace.
pub(crate) fn cleanup(markup: &str) -> String {
    let without_empty = remove_empty_elements(markup);
    let collapsed = blank_lines_re().replace_all(&without_empty, "\n\n");
    let uncommented = comment_re().replace_all(&collapsed, "");
    uncommented.trim().to_string()
}

/// Remove `<tag ...>whitespace</tag>` pairs until none remain, so emptied
/// parents go too.
fn remove_empty_elements(markup: &str) -> String {
    let re = empty_element_re();
    let mut current = markup.to_string();

    loop {
        let mut changed = false;
        let next = re.replace_all(&current, |caps: &Captures| {
            if caps[1].eq_ignore_ascii_case(&caps[2]) {
                changed = true;
                String::new()
            } else {
                caps[0].to_string()
            }
        });
        if !changed {
            return current;
        }
        current = next.into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(html: &str) -> String {
        MarkupNormalizer::default().normalize(html)
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n  "), "");
    }

    #[test]
    fn heading_marker() {
        assert_eq!(normalize("<h2>Title</h2>"), "<h2>[h2]Title[/h2]</h2>");
    }

    #[test]
    fn list_flattening() {
        let out = normalize("<ul><li>A</li><li>B</li></ul>");
        assert_eq!(out, "<div>\n• A\n• B\n</div>");
        assert!(!out.contains("<ul>"));
        assert!(!out.contains("<li>"));
    }

    #[test]
    fn noise_elements_and_content_removed() {
        let out = normalize(
            r#"<p>Story</p><script>alert("x")</script><style>p{}</style>
               <aside>Sidebar</aside><div class="social-share">Share</div>
               <div role="complementary">Extra</div><button>Click</button>"#,
        );
        assert_eq!(out, "<p>Story</p>");
    }

    #[test]
    fn attributes_outside_allow_list_removed() {
        let out = normalize(
            r#"<p class="lead" style="color:red" onclick="x()">Text <a href="/more" target="_blank">more</a> <img src="a.png" alt="A"></p>"#,
        );
        assert_eq!(out, r#"<p>Text <a href="/more">more</a> <img src="a.png"></p>"#);
    }

    #[test]
    fn blank_line_runs_collapse() {
        let out = normalize("<p>One</p>\n\n\n\n<p>Two</p>\n \n\t\n<p>Three</p>");
        assert_eq!(out, "<p>One</p>\n\n<p>Two</p>\n\n<p>Three</p>");
    }

    #[test]
    fn nested_empty_elements_removed() {
        let out = normalize(r#"<div class="wrap"><p> </p><span></span></div><p>Kept</p>"#);
        assert_eq!(out, "<p>Kept</p>");
    }

    #[test]
    fn comments_removed() {
        let out = normalize("<p>A</p><!-- tracking pixel --><p>B</p>");
        assert_eq!(out, "<p>A</p><p>B</p>");
    }

    #[test]
    fn cleanup_handles_mismatched_pairs() {
        // the void <img> is followed by a different closing tag and must survive
        assert_eq!(
            cleanup(r#"<a href="/x"><img src="i"></a>"#),
            r#"<a href="/x"><img src="i"></a>"#
        );
        assert_eq!(cleanup("<b attr=\"1\">\n</b>x"), "x");
    }

    #[test]
    fn cleanup_removes_comment_text_and_trims() {
        assert_eq!(cleanup("  <!-- a\nmultiline -->text \n"), "text");
    }

    #[test]
    fn normalization_is_idempotent() {
        let input = r#"
            <div class="post">
                <h1 class="title">Big <em>News</em></h1>


                <p data-x="1">Intro paragraph.</p>
                <ol><li>First</li><li>Second <ul><li>Nested</li></ul></li></ol>
                <nav>Menu</nav>
                <p></p>
            </div>"#;
        let once = normalize(input);
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert!(once.contains("[h1]Big News[/h1]"));
        assert!(!once.contains("[h1][h1]"));
        assert!(once.contains("• First\n• Second Nested\n• Nested"));
    }

    #[test]
    fn preformatted_text_is_stable_across_passes() {
        for input in ["<pre>\n\nx</pre>", "<pre>\n\nx\n</pre>", "<textarea>\n\nnote</textarea>"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "unstable for {:?}", input);
        }
        assert_eq!(normalize("<pre>\n\nx</pre>"), "<pre>\n\nx</pre>");
    }

    #[test]
    fn locator_marked_content_is_not_remarked() {
        let out = normalize("<h3>[h3]Already[/h3]</h3><div>\n• x\n• y\n</div>");
        assert_eq!(out, "<h3>[h3]Already[/h3]</h3><div>\n• x\n• y\n</div>");
    }

    #[test]
    fn try_new_rejects_bad_selector() {
        let mut config = ExtractionConfig::default();
        config.normalizer_noise_selectors.push("[".to_string());
        assert!(MarkupNormalizer::try_new(&config).is_err());
    }
}
