//! Text normalization and line bookkeeping.
//!
//! Raw page text becomes one flat sequence of lines plus a page index that
//! maps line offsets back to 1-based page numbers.

mod frequency;
mod normalize;
mod page_index;

use std::sync::LazyLock;

use regex::Regex;

pub use frequency::FrequencyTable;
pub use normalize::{normalize_page, Line, NormalizedDocument};
pub use page_index::PageIndex;

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// # Examples
/// ```
/// use methodology_extractor::text::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Data \t and\nparameters "), "Data and parameters");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Page markers such as `3 of 12` or `Page 3 of 12`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:page\s+)?\d+\s+of\s+\d+$").expect("valid regex"));

/// Whether a trimmed line is a page marker.
#[must_use]
pub fn is_page_marker(line: &str) -> bool {
    PAGE_MARKER_PATTERN.is_match(line)
}

/// Whether a line is page furniture: a page marker or a running header.
///
/// Furniture never belongs to section text or rule text.
#[must_use]
pub fn is_page_furniture(line: &str, headers: &FrequencyTable) -> bool {
    is_page_marker(line.trim()) || headers.is_running_header(line)
}
