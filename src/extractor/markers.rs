//! Structural marker syntax shared by the locator and the normalizer
//!
//! Headings become `[h2]Title[/h2]`, list items become `• item` lines. Both
//! helpers leave already-marked text alone so running the pipeline twice
//! never nests or duplicates markers.

/// Prefix for a flattened list item
pub const BULLET: &str = "•";

/// Wrap heading text in level markers, e.g. `[h2]Title[/h2]`.
///
/// `tag` is the lowercase heading tag name (`h1`..`h6`).
pub fn heading(tag: &str, text: &str) -> String {
    let text = text.trim();
    if is_heading_marked(tag, text) {
        return text.to_string();
    }
    format!("[{tag}]{text}[/{tag}]")
}

fn is_heading_marked(tag: &str, text: &str) -> bool {
    let open = format!("[{tag}]");
    let close = format!("[/{tag}]");
    text.len() >= open.len() + close.len() && text.starts_with(&open) && text.ends_with(&close)
}

/// Render one list item as a bulleted line.
pub fn bullet_line(text: &str) -> String {
    let text = text.trim();
    if text.starts_with(BULLET) {
        return text.to_string();
    }
    format!("{BULLET} {text}")
}

/// Join bulleted lines into a block with a leading and trailing newline.
pub fn bullet_block<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = items.into_iter().map(|item| bullet_line(item.as_ref())).collect();
    format!("\n{}\n", lines.join("\n"))
}

/// Whether `name` is a heading tag (`h1`..`h6`)
pub fn is_heading_tag(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_wraps_trimmed_text() {
        assert_eq!(heading("h2", "  Title \n"), "[h2]Title[/h2]");
    }

    #[test]
    fn heading_does_not_rewrap() {
        assert_eq!(heading("h3", "[h3]Already[/h3]"), "[h3]Already[/h3]");
    }

    #[test]
    fn heading_with_other_level_marker_is_wrapped() {
        assert_eq!(heading("h1", "[h2]x[/h2]"), "[h1][h2]x[/h2][/h1]");
    }

    #[test]
    fn empty_heading_still_marked() {
        assert_eq!(heading("h4", "   "), "[h4][/h4]");
    }

    #[test]
    fn bullet_block_layout() {
        assert_eq!(bullet_block(["A", " B "]), "\n• A\n• B\n");
    }

    #[test]
    fn bullet_line_is_idempotent() {
        let once = bullet_line("item");
        assert_eq!(bullet_line(&once), once);
    }

    #[test]
    fn heading_tags() {
        assert!(is_heading_tag("h6"));
        assert!(!is_heading_tag("h7"));
        assert!(!is_heading_tag("header"));
    }
}
