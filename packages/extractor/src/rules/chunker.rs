//! Group section body lines into rule candidates.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{collapse_whitespace, is_page_furniture, FrequencyTable, NormalizedDocument};

/// Bullet and list markers: `-`, `•`, `*`, `3.`, `b)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BULLET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-\u{2022}*]|\d+\.|[a-z]\))\s+").expect("valid regex"));

/// Strip a leading bullet marker, if any.
///
/// # Examples
/// ```
/// use methodology_extractor::rules::strip_bullet;
///
/// assert_eq!(strip_bullet("  - record fuel use"), Some("record fuel use"));
/// assert_eq!(strip_bullet("b) measure flow"), Some("measure flow"));
/// assert_eq!(strip_bullet("plain line"), None);
/// ```
#[must_use]
pub fn strip_bullet(line: &str) -> Option<&str> {
    BULLET_PATTERN.find(line).map(|m| &line[m.end()..])
}

/// A candidate rule: whitespace-collapsed text and the line where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Offset of the first non-blank line of the chunk.
    pub line: usize,

    /// Whitespace-collapsed text.
    pub text: String,
}

/// Buffer of the chunk state machine.
#[derive(Debug, Default)]
struct ChunkBuffer {
    first_line: Option<usize>,
    parts: Vec<String>,
}

impl ChunkBuffer {
    fn push(&mut self, offset: usize, text: &str) {
        if self.first_line.is_none() && !text.trim().is_empty() {
            self.first_line = Some(offset);
        }
        self.parts.push(text.to_string());
    }

    fn flush(&mut self, chunks: &mut Vec<Chunk>) {
        let buffer = std::mem::take(self);
        let Some(line) = buffer.first_line else {
            return;
        };
        let text = collapse_whitespace(&buffer.parts.join(" "));
        if !text.is_empty() {
            chunks.push(Chunk { line, text });
        }
    }
}

/// Split the given body lines into chunks.
///
/// A bullet line flushes the buffer and seeds a new one with its
/// marker-stripped text. Any other line is appended, and flushes the
/// buffer when it ends with a period. The end of the body flushes
/// unconditionally. Running headers and page markers are skipped, so a
/// sentence broken across pages stays one chunk.
#[must_use]
pub fn chunk_lines(
    doc: &NormalizedDocument,
    body: impl IntoIterator<Item = usize>,
    headers: &FrequencyTable,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer = ChunkBuffer::default();

    for offset in body {
        let Some(line) = doc.line(offset) else {
            continue;
        };
        if is_page_furniture(line, headers) {
            continue;
        }

        if let Some(item) = strip_bullet(line) {
            buffer.flush(&mut chunks);
            buffer.push(offset, item);
        } else {
            buffer.push(offset, line);
            if line.trim_end().ends_with('.') {
                buffer.flush(&mut chunks);
            }
        }
    }
    buffer.flush(&mut chunks);

    chunks
}

/// Every line of at least `min_len` characters, as its own chunk.
///
/// Running headers and page markers are never chunks.
#[must_use]
pub fn scan_lines(doc: &NormalizedDocument, headers: &FrequencyTable, min_len: usize) -> Vec<Chunk> {
    doc.iter()
        .filter(|line| !is_page_furniture(line.text, headers))
        .filter_map(|line| {
            let trimmed = line.text.trim();
            (trimmed.chars().count() >= min_len).then(|| Chunk {
                line: line.offset,
                text: collapse_whitespace(trimmed),
            })
        })
        .collect()
}
