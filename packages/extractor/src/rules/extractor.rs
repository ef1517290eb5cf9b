//! Rule extraction over a section layout.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::chunker::{chunk_lines, scan_lines, Chunk};
use super::classify::{compile_obligation_pattern, Classifier};
use super::ids::IdScheme;
use super::RuleMode;
use crate::config::{RuleConfig, PLACEHOLDER_RULE_TEXT};
use crate::error::Result;
use crate::sections::SectionLayout;
use crate::text::{FrequencyTable, NormalizedDocument};
use crate::types::{Rule, RuleType, RunContext};

/// Sentence boundary: a terminator followed by the end of text, or by
/// whitespace and a character that is not a lowercase letter.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](?:\s*$|\s+[^\p{Ll}\s])").expect("valid regex"));

/// Abbreviations whose trailing period never ends a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "cf", "vs", "approx", "no", "nos", "eq", "fig", "para", "sect",
];

/// Whether the word just before a boundary at `end` is an abbreviation.
fn ends_with_abbreviation(text: &str, end: usize) -> bool {
    text[..end]
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .is_some_and(|word| ABBREVIATIONS.contains(&word.to_lowercase().as_str()))
}

/// Rule label: text up to the first sentence boundary, capped at `max_chars`.
///
/// # Examples
/// ```
/// use methodology_extractor::rules::label_for;
///
/// assert_eq!(label_for("Use 0.5 t/ha. Then report.", 120), "Use 0.5 t/ha");
/// assert_eq!(label_for("Fuels, e.g. Diesel, are logged.", 120), "Fuels, e.g. Diesel, are logged");
/// assert_eq!(label_for("abcdef", 3), "abc");
/// ```
#[must_use]
pub fn label_for(text: &str, max_chars: usize) -> String {
    let sentence = SENTENCE_END
        .find_iter(text)
        .map(|m| m.start())
        .find(|&end| !ends_with_abbreviation(text, end))
        .map_or(text, |end| &text[..end])
        .trim();
    let sentence = if sentence.is_empty() { text } else { sentence };
    sentence.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

/// Fold state of rule extraction: emitted rules, seen texts and per-section counters.
#[derive(Debug, Default)]
struct RuleAccumulator {
    rules: Vec<Rule>,
    seen: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl RuleAccumulator {
    /// Next counter value for a section, starting at 1.
    fn next_counter(&mut self, section_id: &str) -> usize {
        let counter = self.counters.entry(section_id.to_string()).or_default();
        *counter += 1;
        *counter
    }
}

/// Turns chunks of section text into classified, deduplicated rules.
#[derive(Debug)]
pub struct RuleExtractor {
    mode: RuleMode,
    obligations: Regex,
    classifier: Classifier,
    min_line_len: usize,
    max_label_chars: usize,
    id_scheme: IdScheme,
}

impl RuleExtractor {
    /// Compile rule settings.
    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        Ok(Self {
            mode: config.mode,
            obligations: compile_obligation_pattern(&config.obligation_keywords)?,
            classifier: Classifier::new(&config.classification),
            min_line_len: config.min_line_len,
            max_label_chars: config.max_label_chars,
            id_scheme: config.id_scheme,
        })
    }

    /// Whether text contains an obligation keyword.
    #[must_use]
    pub fn is_obligation(&self, text: &str) -> bool {
        self.obligations.is_match(text)
    }

    /// Extract rules from all sections.
    ///
    /// Never returns an empty list: a document without obligations yields a
    /// single `note` placeholder attached to the first section.
    #[must_use]
    pub fn extract(
        &self,
        doc: &NormalizedDocument,
        layout: &SectionLayout,
        headers: &FrequencyTable,
        context: &RunContext,
    ) -> Vec<Rule> {
        if self.id_scheme == IdScheme::Namespaced && context.method.is_none() {
            tracing::warn!("Namespaced rule ids need methodology metadata, using section-scoped ids");
        }

        let candidates: Vec<(&str, Chunk)> = match self.mode {
            RuleMode::Chunked => layout
                .iter()
                .flat_map(|(section, span)| {
                    chunk_lines(doc, span.body_lines(), headers)
                        .into_iter()
                        .map(move |chunk| (section.id.as_str(), chunk))
                })
                .collect(),
            RuleMode::LineScan => scan_lines(doc, headers, self.min_line_len)
                .into_iter()
                .filter_map(|chunk| {
                    layout
                        .section_for_line(chunk.line)
                        .map(|section_id| (section_id, chunk))
                })
                .collect(),
        };
        tracing::debug!(candidates = candidates.len(), mode = ?self.mode, "Collected rule candidates");

        let accumulator = candidates.into_iter().fold(
            RuleAccumulator::default(),
            |acc, (section_id, chunk)| self.accept(acc, section_id, chunk, doc, context),
        );

        let mut rules = accumulator.rules;
        if rules.is_empty() {
            if let Some(placeholder) = self.placeholder(layout, context) {
                tracing::warn!(
                    section_id = %placeholder.section_id,
                    "No obligations found, emitting placeholder rule"
                );
                rules.push(placeholder);
            }
        }

        rules
    }

    /// One fold step: keep the chunk if it is a new obligation.
    fn accept(
        &self,
        mut acc: RuleAccumulator,
        section_id: &str,
        chunk: Chunk,
        doc: &NormalizedDocument,
        context: &RunContext,
    ) -> RuleAccumulator {
        if !self.is_obligation(&chunk.text) || acc.seen.contains(&chunk.text) {
            return acc;
        }

        let counter = acc.next_counter(section_id);
        let rule = Rule {
            id: self
                .id_scheme
                .rule_id(section_id, counter, context.method.as_ref()),
            section_id: section_id.to_string(),
            label: label_for(&chunk.text, self.max_label_chars),
            rule_type: self.classifier.classify(&chunk.text),
            page: doc.page_for_line(chunk.line),
            text: chunk.text.clone(),
            citations: Vec::new(),
            source: context.source.clone(),
        };

        acc.seen.insert(chunk.text);
        acc.rules.push(rule);
        acc
    }

    /// The "review pending" rule for documents without obligations.
    fn placeholder(&self, layout: &SectionLayout, context: &RunContext) -> Option<Rule> {
        let section = layout.sections.first()?;
        Some(Rule {
            id: self
                .id_scheme
                .rule_id(&section.id, 1, context.method.as_ref()),
            section_id: section.id.clone(),
            label: PLACEHOLDER_RULE_TEXT.to_string(),
            rule_type: RuleType::Note,
            page: section.page_start,
            text: PLACEHOLDER_RULE_TEXT.to_string(),
            citations: Vec::new(),
            source: context.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{default_heading_rules, BoundaryDetector};
    use crate::sections::build_sections;
    use crate::types::MethodologyMeta;
    use pretty_assertions::assert_eq;

    fn run(pages: &[&str], config: &RuleConfig, context: &RunContext) -> Vec<Rule> {
        let doc = NormalizedDocument::from_pages(pages);
        let headers = FrequencyTable::disabled();
        let detector = BoundaryDetector::from_rules(&default_heading_rules()).unwrap();
        let headings = detector.detect(&doc, &headers);
        let layout = build_sections(&doc, &headings, &headers);
        RuleExtractor::from_config(config)
            .unwrap()
            .extract(&doc, &layout, &headers, context)
    }

    fn default_run(pages: &[&str]) -> Vec<Rule> {
        run(pages, &RuleConfig::default(), &RunContext::new("source.pdf"))
    }

    #[test]
    fn test_label_for() {
        assert_eq!(
            label_for("The operator shall monitor emissions monthly.", 120),
            "The operator shall monitor emissions monthly"
        );
        assert_eq!(label_for("Is it required? Yes.", 120), "Is it required");
        assert_eq!(label_for("no terminator", 120), "no terminator");
        assert_eq!(label_for(". leading", 120), ". leading");
        assert_eq!(label_for(&"x".repeat(200), 120).chars().count(), 120);
    }

    #[test]
    fn test_label_for_keeps_abbreviations() {
        assert_eq!(
            label_for("Fuels, e.g. diesel, shall be recorded.", 120),
            "Fuels, e.g. diesel, shall be recorded"
        );
        assert_eq!(
            label_for("Apply Eq. 4 (cf. Annex 2) to all strata. Then report.", 120),
            "Apply Eq. 4 (cf. Annex 2) to all strata"
        );
        assert_eq!(
            label_for("Record fuel, oil, etc. Then report.", 120),
            "Record fuel, oil, etc. Then report"
        );
        assert_eq!(
            label_for("Use 1.5 t of wood. also report.", 120),
            "Use 1.5 t of wood. also report"
        );
    }

    #[test]
    fn test_rules_in_scenario_document() {
        let rules = default_run(&[
            "1. Scope\nThis section defines scope.\n2. Monitoring\nThe operator shall monitor emissions monthly.\nData shall be recorded.",
        ]);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, "R-S-2-001");
        assert_eq!(rules[0].section_id, "S-2");
        assert_eq!(rules[0].rule_type, RuleType::Monitoring);
        assert_eq!(rules[0].label, "The operator shall monitor emissions monthly");
        assert_eq!(rules[1].id, "R-S-2-002");
        assert!(rules[1].text.contains("recorded"));
        assert_eq!(rules[1].source.document, "source.pdf");
        assert!(rules.iter().all(|r| r.citations.is_empty()));
    }

    #[test]
    fn test_counters_are_per_section() {
        let rules = default_run(&[
            "1 Baseline\nThe baseline shall be fixed.\n2 Leakage\nLeakage must be deducted.\nLeakage shall be monitored.",
        ]);
        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-S-1-001", "R-S-2-001", "R-S-2-002"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let rules = default_run(&[
            "1 Scope\nData shall be recorded.\n2 Other\nData   shall be\nrecorded.",
        ]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].section_id, "S-1");
    }

    #[test]
    fn test_rule_page_is_chunk_start() {
        let rules = default_run(&["1 Scope\nintro text.", "Data shall be recorded."]);
        assert_eq!(rules[0].page, 2);
    }

    #[test]
    fn test_prelude_first_line_is_body() {
        let rules = default_run(&["Operators must register.\n1 Scope\nNothing here."]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "R-S-1-001");
        assert_eq!(rules[0].text, "Operators must register.");
    }

    #[test]
    fn test_placeholder_when_no_obligations() {
        let rules = default_run(&["1 Scope\nNothing to see here."]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_type, RuleType::Note);
        assert_eq!(rules[0].id, "R-S-1-001");
        assert_eq!(rules[0].text, PLACEHOLDER_RULE_TEXT);
        assert_eq!(rules[0].page, 1);
    }

    #[test]
    fn test_placeholder_for_empty_document() {
        let rules = default_run(&[]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].section_id, "S-1");
        assert_eq!(rules[0].rule_type, RuleType::Note);
    }

    #[test]
    fn test_line_scan_mode_with_namespaced_ids() {
        let config = RuleConfig {
            mode: RuleMode::LineScan,
            id_scheme: IdScheme::Namespaced,
            ..RuleConfig::default()
        };
        let context = RunContext::new("txt/source.txt").with_method(MethodologyMeta {
            id: "AR-AMS0001".to_string(),
            version: "1.0".to_string(),
            title: None,
        });
        let rules = run(
            &["1 Scope\nshort shall\n2 Monitoring\nThe operator shall monitor emissions monthly"],
            &config,
            &context,
        );

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "AR-AMS0001.1.0.R-2-001");
        assert_eq!(rules[0].section_id, "S-2");
    }
}
