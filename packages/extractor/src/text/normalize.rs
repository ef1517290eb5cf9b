//! Raw page text to a flat line sequence.

use unicode_normalization::UnicodeNormalization;

use super::frequency::FrequencyTable;
use super::page_index::PageIndex;

/// Page separator emitted by text extractors such as `pdftotext`.
const FORM_FEED: char = '\u{000C}';

/// A single normalized line with its position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 0-based offset in the flattened document.
    pub offset: usize,

    /// 1-based originating page.
    pub page: usize,

    /// Line text with trailing whitespace removed.
    pub text: &'a str,
}

/// Normalize one page of raw text into lines.
///
/// Applies Unicode compatibility normalization (NFKC, which folds ligatures
/// like "ﬁ" and non-breaking spaces), unifies line endings and trims
/// trailing whitespace. Blank lines are kept.
///
/// # Examples
/// ```
/// use methodology_extractor::text::normalize_page;
///
/// assert_eq!(normalize_page("de\u{FB01}ned  \r\n\r\nnext"), vec!["defined", "", "next"]);
/// ```
#[must_use]
pub fn normalize_page(raw: &str) -> Vec<String> {
    let folded: String = raw.nfkc().collect();
    folded
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// The flattened, normalized lines of one document and its page index.
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDocument {
    lines: Vec<String>,
    pages: PageIndex,
}

impl NormalizedDocument {
    /// Build from ordered per-page raw text.
    #[must_use]
    pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> Self {
        let mut lines = Vec::new();
        let mut counts = Vec::with_capacity(pages.len());
        for page in pages {
            let page_lines = normalize_page(page.as_ref());
            counts.push(page_lines.len());
            lines.extend(page_lines);
        }

        tracing::debug!(
            pages = counts.len(),
            lines = lines.len(),
            "Normalized document text"
        );

        Self {
            lines,
            pages: PageIndex::from_line_counts(counts),
        }
    }

    /// Build from one whole-document string, splitting pages on form feeds.
    ///
    /// A trailing form feed does not open an extra page.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<&str> = text.split(FORM_FEED).collect();
        if pages.len() > 1 && pages.last().is_some_and(|page| page.trim().is_empty()) {
            pages.pop();
        }
        Self::from_pages(&pages)
    }

    /// All lines in document order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Text of the line at `offset`.
    #[must_use]
    pub fn line(&self, offset: usize) -> Option<&str> {
        self.lines.get(offset).map(String::as_str)
    }

    /// Iterate lines with their offsets and pages.
    pub fn iter(&self) -> impl Iterator<Item = Line<'_>> {
        self.lines.iter().enumerate().map(|(offset, text)| Line {
            offset,
            page: self.pages.page_for_line(offset),
            text,
        })
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The page index.
    #[must_use]
    pub fn page_index(&self) -> &PageIndex {
        &self.pages
    }

    /// 1-based page of a line offset, clamped to the last page.
    #[must_use]
    pub fn page_for_line(&self, offset: usize) -> usize {
        self.pages.page_for_line(offset)
    }

    /// Count line frequencies for running header detection.
    #[must_use]
    pub fn frequency_table(&self, threshold: Option<usize>) -> FrequencyTable {
        FrequencyTable::build(self.lines.iter().map(String::as_str), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_endings_unified() {
        assert_eq!(normalize_page("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_trailing_whitespace_trimmed_leading_kept() {
        assert_eq!(normalize_page("  - item \t"), vec!["  - item"]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(normalize_page("a\n\n\nb"), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_empty_page_has_no_lines() {
        assert!(normalize_page("").is_empty());
    }

    #[test]
    fn test_nfkc_folding() {
        assert_eq!(normalize_page("e\u{FB03}cient\u{00A0}use"), vec!["efficient use"]);
    }

    #[test]
    fn test_from_pages_flattens_and_indexes() {
        let doc = NormalizedDocument::from_pages(&["one\ntwo", "three"]);
        assert_eq!(doc.lines(), &["one", "two", "three"]);
        assert_eq!(doc.page_for_line(0), 1);
        assert_eq!(doc.page_for_line(2), 2);
        assert_eq!(doc.page_index().line_count(), doc.line_count());
    }

    #[test]
    fn test_from_text_splits_form_feeds() {
        let doc = NormalizedDocument::from_text("page one\n\u{000C}page two\n\u{000C}");
        assert_eq!(doc.page_index().page_count(), 2);
        assert_eq!(doc.page_for_line(0), 1);
        assert_eq!(doc.page_for_line(1), 2);
    }

    #[test]
    fn test_from_text_without_form_feed_is_one_page() {
        let doc = NormalizedDocument::from_text("a\nb\nc\n");
        assert_eq!(doc.page_index().page_count(), 1);
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_iter_reports_offsets_and_pages() {
        let doc = NormalizedDocument::from_pages(&["a", "b\nc"]);
        let lines: Vec<(usize, usize, &str)> =
            doc.iter().map(|l| (l.offset, l.page, l.text)).collect();
        assert_eq!(lines, vec![(0, 1, "a"), (1, 2, "b"), (2, 2, "c")]);
    }

    #[test]
    fn test_empty_document() {
        let doc = NormalizedDocument::from_pages::<&str>(&[]);
        assert!(doc.is_empty());
        assert_eq!(doc.page_for_line(0), 1);
        assert_eq!(doc.line(0), None);
    }
}
