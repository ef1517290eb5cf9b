//! Core data types for the extractor.
//!
//! `Section` and `Rule` are the two output artifacts. Their field order is
//! the JSON field order, so reordering fields changes the wire format.

use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

/// A contiguous span of document text under one detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Run-scoped identifier (`S-1`, `S-2`, ...).
    pub id: String,

    /// Dotted heading number (e.g., "4.2") when the heading was numbered.
    pub number: Option<String>,

    /// Heading title with internal whitespace collapsed.
    pub title: String,

    /// 1 for top-level or unnumbered headings, 2 for dotted numbers.
    pub level: u8,

    /// First page of the section body (1-based).
    pub page_start: usize,

    /// Last page of the section body (1-based).
    pub page_end: usize,

    /// Body text between this heading and the next, trimmed.
    pub text: String,

    /// Up to three lowercase keywords from the title.
    pub anchors: Vec<String>,
}

impl Section {
    /// Key used to decide whether two adjacent sections repeat one heading.
    ///
    /// # Examples
    /// ```
    /// use methodology_extractor::types::Section;
    ///
    /// assert_eq!(Section::title_key("APPENDIX   A"), Section::title_key("Appendix A"));
    /// ```
    #[must_use]
    pub fn title_key(title: &str) -> String {
        collapse_whitespace(title).to_lowercase()
    }

    /// Hierarchy level for a heading number.
    #[must_use]
    pub fn level_for(number: Option<&str>) -> u8 {
        match number {
            Some(n) if n.contains('.') => 2,
            _ => 1,
        }
    }
}

/// Topic classification of an extracted rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Baseline scenario and baseline emissions.
    Baseline,

    /// Monitoring, measurement, record keeping, QA/QC.
    Monitoring,

    /// Leakage emissions.
    Leakage,

    /// Additionality demonstration.
    Additionality,

    /// Obligation with no recognized topic.
    Unspecified,

    /// Placeholder emitted when a document yields no rules.
    Note,
}

impl RuleType {
    /// Get the string value used in JSON output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Monitoring => "monitoring",
            Self::Leakage => "leakage",
            Self::Additionality => "additionality",
            Self::Unspecified => "unspecified",
            Self::Note => "note",
        }
    }
}

/// Originating document of a rule, filled in by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSource {
    /// Opaque document path or name.
    pub document: String,
}

impl RuleSource {
    /// Create a new source reference.
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

/// A single obligation sentence or bullet anchored to its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Run-scoped identifier encoding section and sequence (e.g., `R-S-3-002`).
    pub id: String,

    /// Identifier of the owning section.
    pub section_id: String,

    /// Text up to the first sentence boundary, capped in length.
    pub label: String,

    /// Topic classification.
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Page where the rule text starts (1-based).
    pub page: usize,

    /// Whitespace-normalized rule text.
    pub text: String,

    /// Cross-references; populated outside this crate.
    pub citations: Vec<String>,

    /// Originating document.
    pub source: RuleSource,
}

/// Methodology metadata read from `META.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodologyMeta {
    /// Methodology identifier (e.g., "AR-AMS0001").
    pub id: String,

    /// Methodology version (e.g., "1.0").
    pub version: String,

    /// Human readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Caller-supplied context for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Methodology metadata, used only for namespaced rule ids.
    pub method: Option<MethodologyMeta>,

    /// Source reference copied into every rule.
    pub source: RuleSource,
}

impl RunContext {
    /// Create a context for a source document.
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            method: None,
            source: RuleSource::new(document),
        }
    }

    /// Attach methodology metadata.
    #[must_use]
    pub fn with_method(mut self, method: MethodologyMeta) -> Self {
        self.method = Some(method);
        self
    }
}

/// The two artifacts of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Sections in document order.
    pub sections: Vec<Section>,

    /// Rules in document order.
    pub rules: Vec<Rule>,
}

impl Extraction {
    /// Whether the rule set is the single "review pending" placeholder.
    #[must_use]
    pub fn is_placeholder_only(&self) -> bool {
        matches!(self.rules.as_slice(), [rule] if rule.rule_type == RuleType::Note)
    }

    /// Look up a section by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
