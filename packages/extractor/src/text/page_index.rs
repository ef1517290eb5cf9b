//! Line offset to page number lookup.

use std::ops::Range;

/// Half-open line ranges, one per page.
///
/// Built once per run and shared read-only by section building and rule
/// extraction. Lookups never fail: offsets past the last range resolve to
/// the last page, and an index without pages resolves everything to page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    ranges: Vec<Range<usize>>,
}

impl PageIndex {
    /// Build an index from ordered per-page line counts.
    ///
    /// # Examples
    /// ```
    /// use methodology_extractor::text::PageIndex;
    ///
    /// let index = PageIndex::from_line_counts([3, 2]);
    /// assert_eq!(index.page_for_line(0), 1);
    /// assert_eq!(index.page_for_line(3), 2);
    /// assert_eq!(index.page_for_line(99), 2);
    /// ```
    #[must_use]
    pub fn from_line_counts(counts: impl IntoIterator<Item = usize>) -> Self {
        let mut ranges = Vec::new();
        let mut total = 0;
        for count in counts {
            ranges.push(total..total + count);
            total += count;
        }
        Self { ranges }
    }

    /// 1-based page containing `offset`.
    #[must_use]
    pub fn page_for_line(&self, offset: usize) -> usize {
        // Empty pages have zero-width ranges and are never selected.
        let position = self.ranges.partition_point(|range| range.end <= offset);
        match self.ranges.get(position) {
            Some(range) if range.contains(&offset) => position + 1,
            _ => self.page_count().max(1),
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.ranges.len()
    }

    /// Total number of lines across all pages.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.ranges.last().map_or(0, |range| range.end)
    }
}
