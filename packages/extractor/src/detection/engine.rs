//! Boundary detector that scans lines with the matcher registry.

use super::config::build_registry;
use super::registry::MatcherRegistry;
use super::types::{HeadingCandidate, HeadingRule};
use crate::error::Result;
use crate::text::{collapse_whitespace, is_page_marker, FrequencyTable, NormalizedDocument};

/// Detects heading candidates in a normalized document.
///
/// Blank lines, page markers and running headers are never headings. The
/// first candidate is always at line 0; a synthetic "Prelude" heading is
/// inserted when the document does not open with a heading.
#[derive(Debug)]
pub struct BoundaryDetector {
    registry: MatcherRegistry,
}

impl BoundaryDetector {
    /// Create a detector from a registry.
    #[must_use]
    pub fn new(registry: MatcherRegistry) -> Self {
        Self { registry }
    }

    /// Compile heading rules into a detector.
    pub fn from_rules(rules: &[HeadingRule]) -> Result<Self> {
        Ok(Self::new(build_registry(rules)?))
    }

    /// Scan all lines and return heading candidates in increasing line order.
    #[must_use]
    pub fn detect(
        &self,
        doc: &NormalizedDocument,
        headers: &FrequencyTable,
    ) -> Vec<HeadingCandidate> {
        let mut candidates = Vec::new();
        let mut suppressed = 0usize;

        for line in doc.iter() {
            let trimmed = line.text.trim();
            if trimmed.is_empty() || is_page_marker(trimmed) {
                continue;
            }

            let Some((rule, found)) = self.registry.first_match(trimmed) else {
                continue;
            };

            if headers.is_running_header(trimmed) {
                suppressed += 1;
                continue;
            }

            let title = collapse_whitespace(&found.title);
            tracing::trace!(line = line.offset, rule, title = %title, "Heading detected");
            candidates.push(HeadingCandidate::new(line.offset, found.number, title));
        }

        if suppressed > 0 {
            tracing::warn!(
                suppressed,
                headers = ?headers.running_headers(),
                "Running header lines matched heading rules and were ignored"
            );
        }

        if !matches!(candidates.first(), Some(first) if first.line == 0) {
            candidates.insert(0, HeadingCandidate::prelude());
        }

        tracing::debug!(headings = candidates.len(), "Detected headings");
        candidates
    }
}
