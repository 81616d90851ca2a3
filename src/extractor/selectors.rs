//! Selector list compilation

use scraper::Selector;

use super::types::ExtractError;

/// Compile a configured selector list, skipping entries that fail to parse.
pub(crate) fn compile_lenient(list: &'static str, selectors: &[String]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!("Skipping invalid selector '{}' in {}: {:?}", s, list, e);
                None
            }
        })
        .collect()
}

/// Compile a configured selector list, failing on the first bad entry.
pub(crate) fn compile_strict(
    list: &'static str,
    selectors: &[String],
) -> Result<Vec<Selector>, ExtractError> {
    selectors
        .iter()
        .map(|s| {
            Selector::parse(s).map_err(|_| ExtractError::InvalidSelector {
                list,
                selector: s.clone(),
            })
        })
        .collect()
}
