//! Build sections from heading candidates.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::layout::{SectionLayout, SectionSpan};
use crate::config::{MAX_ANCHORS, MIN_ANCHOR_LEN};
use crate::detection::HeadingCandidate;
use crate::text::{is_page_furniture, FrequencyTable, NormalizedDocument};
use crate::types::Section;

/// Whole alphabetic words long enough to be anchors, accented letters included.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANCHOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b\p{{Alphabetic}}{{{MIN_ANCHOR_LEN},}}\b")).expect("valid regex")
});

/// Up to [`MAX_ANCHORS`] distinct lowercase keywords from a title.
///
/// # Examples
/// ```
/// use methodology_extractor::sections::anchors_for_title;
///
/// assert_eq!(
///     anchors_for_title("4.2 Baseline emissions and baseline data"),
///     vec!["baseline", "emissions", "data"]
/// );
/// ```
#[must_use]
pub fn anchors_for_title(title: &str) -> Vec<String> {
    let mut anchors: Vec<String> = Vec::with_capacity(MAX_ANCHORS);
    for word in ANCHOR_PATTERN.find_iter(title) {
        let word = word.as_str().to_lowercase();
        if !anchors.contains(&word) {
            anchors.push(word);
        }
        if anchors.len() == MAX_ANCHORS {
            break;
        }
    }
    anchors
}

/// Section under construction, before merging and id assignment.
#[derive(Debug)]
struct SectionDraft {
    number: Option<String>,
    title: String,
    lines: Range<usize>,
    body: Vec<Range<usize>>,
    text: String,
    page_start: usize,
    page_end: usize,
}

impl SectionDraft {
    fn new(
        doc: &NormalizedDocument,
        headers: &FrequencyTable,
        heading: &HeadingCandidate,
        end: usize,
    ) -> Self {
        let body = heading.body_start().min(end)..end;
        let kept: Vec<(usize, &str)> = body
            .clone()
            .filter_map(|offset| doc.line(offset).map(|line| (offset, line)))
            .filter(|(_, line)| !is_page_furniture(line, headers))
            .collect();

        // Pages come from the first and last kept body lines; an empty body
        // sits on the heading's page.
        let (page_start, page_end) = match (kept.first(), kept.last()) {
            (Some(&(first, _)), Some(&(last, _))) => {
                (doc.page_for_line(first), doc.page_for_line(last))
            }
            _ => {
                let page = doc.page_for_line(heading.line);
                (page, page)
            }
        };

        let text = kept
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        Self {
            number: heading.number.clone(),
            title: heading.title.clone(),
            lines: heading.line..end,
            body: vec![body],
            text,
            page_start,
            page_end,
        }
    }

    fn title_key(&self) -> String {
        Section::title_key(&self.title)
    }

    /// Absorb the following section that repeats this section's title.
    fn absorb(&mut self, next: SectionDraft) {
        self.lines.end = next.lines.end;
        self.body.extend(next.body);
        self.text = match (self.text.is_empty(), next.text.is_empty()) {
            (_, true) => std::mem::take(&mut self.text),
            (true, false) => next.text,
            (false, false) => format!("{}\n{}", self.text, next.text),
        };
        self.page_start = self.page_start.min(next.page_start);
        self.page_end = self.page_end.max(next.page_end);
    }

    fn finalize(self, index: usize) -> (Section, SectionSpan) {
        let id = format!("S-{}", index + 1);
        let section = Section {
            id: id.clone(),
            level: Section::level_for(self.number.as_deref()),
            anchors: anchors_for_title(&self.title),
            number: self.number,
            title: self.title,
            page_start: self.page_start,
            page_end: self.page_end,
            text: self.text,
        };
        let span = SectionSpan {
            section_id: id,
            lines: self.lines,
            body: self.body,
        };
        (section, span)
    }
}

/// Convert heading candidates into contiguous sections.
///
/// Section *i* spans from heading *i* up to heading *i+1* (or the end of the
/// document). Adjacent sections whose titles match after case and
/// whitespace folding are merged before ids are assigned, so ids stay
/// contiguous. Sections with empty bodies are kept.
///
/// `headings` must be strictly increasing and start at line 0, as produced
/// by [`BoundaryDetector::detect`](crate::detection::BoundaryDetector::detect).
#[must_use]
pub fn build_sections(
    doc: &NormalizedDocument,
    headings: &[HeadingCandidate],
    headers: &FrequencyTable,
) -> SectionLayout {
    let line_count = doc.line_count();
    let prelude = [HeadingCandidate::prelude()];
    let headings = if headings.is_empty() {
        &prelude[..]
    } else {
        headings
    };

    let mut drafts: Vec<SectionDraft> = Vec::with_capacity(headings.len());
    for (index, heading) in headings.iter().enumerate() {
        let end = headings
            .get(index + 1)
            .map_or(line_count, |next| next.line)
            .max(heading.line)
            .min(line_count);
        let draft = SectionDraft::new(doc, headers, heading, end);

        match drafts.last_mut() {
            Some(previous) if previous.title_key() == draft.title_key() => {
                tracing::debug!(title = %draft.title, line = heading.line, "Merging repeated heading");
                previous.absorb(draft);
            }
            _ => drafts.push(draft),
        }
    }

    let (sections, spans): (Vec<_>, Vec<_>) = drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| draft.finalize(index))
        .unzip();

    tracing::debug!(sections = sections.len(), "Built sections");
    SectionLayout { sections, spans }
}
