//! Section line spans and lookup.

use std::ops::Range;

use crate::types::Section;

/// Line ranges owned by one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    /// Identifier of the section.
    pub section_id: String,

    /// Full half-open line range, heading line included.
    pub lines: Range<usize>,

    /// Body line ranges; more than one after merging repeated headings.
    pub body: Vec<Range<usize>>,
}

impl SectionSpan {
    /// Body line offsets in document order.
    pub fn body_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.body.iter().flat_map(Clone::clone)
    }
}

/// Sections of one document with their line spans.
///
/// `sections[i]` and `spans[i]` describe the same section. Spans are
/// contiguous and cover every line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    /// Finalized sections in document order.
    pub sections: Vec<Section>,

    /// Line spans, parallel to `sections`.
    pub spans: Vec<SectionSpan>,
}

impl SectionLayout {
    /// Identifier of the section owning a line.
    ///
    /// Lines outside every span resolve to the first section.
    #[must_use]
    pub fn section_for_line(&self, offset: usize) -> Option<&str> {
        let position = self.spans.partition_point(|span| span.lines.end <= offset);
        self.spans
            .get(position)
            .filter(|span| span.lines.contains(&offset))
            .or_else(|| self.spans.first())
            .map(|span| span.section_id.as_str())
    }

    /// Iterate sections with their spans.
    pub fn iter(&self) -> impl Iterator<Item = (&Section, &SectionSpan)> {
        self.sections.iter().zip(&self.spans)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Consume the layout, keeping only the sections.
    #[must_use]
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}
