//! Types for heading detection.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_HEADING_TITLE_CHARS, PRELUDE_TITLE};

/// A line identified as the start of a new section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    /// 0-based line offset in the flattened document.
    pub line: usize,

    /// Dotted numeric heading number, when matched by a numbering rule.
    pub number: Option<String>,

    /// Heading title with internal whitespace collapsed.
    pub title: String,

    /// Whether the heading was injected rather than read from a line.
    pub synthetic: bool,
}

impl HeadingCandidate {
    /// Create a new heading candidate.
    #[must_use]
    pub fn new(line: usize, number: Option<String>, title: impl Into<String>) -> Self {
        Self {
            line,
            number,
            title: title.into(),
            synthetic: false,
        }
    }

    /// The synthetic heading covering text before the first real heading.
    #[must_use]
    pub fn prelude() -> Self {
        Self {
            synthetic: true,
            ..Self::new(0, None, PRELUDE_TITLE)
        }
    }

    /// First body line: the heading line itself for a synthetic heading,
    /// the line after it otherwise.
    #[must_use]
    pub fn body_start(&self) -> usize {
        if self.synthetic {
            self.line
        } else {
            self.line + 1
        }
    }
}

/// Result of a single heading rule matching a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Dotted numeric heading number, if any.
    pub number: Option<String>,

    /// Raw title text.
    pub title: String,
}

impl HeadingMatch {
    /// A match without a heading number.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            number: None,
            title: title.into(),
        }
    }

    /// A match with a heading number.
    #[must_use]
    pub fn numbered(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            title: title.into(),
        }
    }
}

/// Declarative heading rule, one per heuristic.
///
/// Serialized with a `kind` tag, e.g. `{kind: all_caps, min_ratio: 0.65}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadingRule {
    /// `4.2 Title`, `1. Title` or `3) Title`.
    Numbered {
        /// Longer titles are treated as numbered list items.
        #[serde(default = "default_max_title_chars")]
        max_title_chars: usize,

        /// Reject titles that start with a non-letter or end in `.`, `;` or `,`.
        /// Turning this off accepts any non-empty title.
        #[serde(default = "default_list_item_guard")]
        list_item_guard: bool,
    },

    /// `Annex 1`, `Appendix A: Title`, case-insensitive keyword.
    Annex,

    /// Mostly uppercase lines such as `BASELINE METHODOLOGY`.
    AllCaps {
        /// Minimum share of uppercase letters among all letters.
        #[serde(default = "default_min_caps_ratio")]
        min_ratio: f64,

        /// Minimum trimmed length in characters.
        #[serde(default = "default_min_caps_len")]
        min_len: usize,

        /// Maximum trimmed length in characters.
        #[serde(default = "default_max_caps_len")]
        max_len: usize,

        /// Minimum number of words.
        #[serde(default = "default_min_caps_words")]
        min_words: usize,
    },

    /// Canonical section names matched against the whole line.
    Keyword {
        /// Section names; matched case-insensitively after collapsing whitespace.
        #[serde(default = "default_heading_keywords")]
        keywords: Vec<String>,
    },

    /// `IV. Baseline` or `II) Scope`.
    Roman {
        /// Maximum line length in characters.
        #[serde(default = "default_max_title_chars")]
        max_title_chars: usize,
    },

    /// Short lines ending in a colon, such as `Data and parameters:`.
    ColonTerminated {
        /// Maximum line length in characters.
        #[serde(default = "default_max_colon_len")]
        max_len: usize,
    },

    /// Custom regex with optional `number` and `title` named groups.
    Pattern {
        /// Regular expression matched against the trimmed line.
        regex: String,
    },
}

impl HeadingRule {
    /// Short name used in log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numbered { .. } => "numbered",
            Self::Annex => "annex",
            Self::AllCaps { .. } => "all_caps",
            Self::Keyword { .. } => "keyword",
            Self::Roman { .. } => "roman",
            Self::ColonTerminated { .. } => "colon_terminated",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// Numbered rule with default settings.
    #[must_use]
    pub fn numbered() -> Self {
        Self::Numbered {
            max_title_chars: default_max_title_chars(),
            list_item_guard: default_list_item_guard(),
        }
    }

    /// All-caps rule with default settings.
    #[must_use]
    pub fn all_caps() -> Self {
        Self::AllCaps {
            min_ratio: default_min_caps_ratio(),
            min_len: default_min_caps_len(),
            max_len: default_max_caps_len(),
            min_words: default_min_caps_words(),
        }
    }

    /// Keyword rule with the canonical section names.
    #[must_use]
    pub fn keyword() -> Self {
        Self::Keyword {
            keywords: default_heading_keywords(),
        }
    }

    /// Roman numeral rule with default settings.
    #[must_use]
    pub fn roman() -> Self {
        Self::Roman {
            max_title_chars: default_max_title_chars(),
        }
    }

    /// Colon-terminated rule with default settings.
    #[must_use]
    pub fn colon_terminated() -> Self {
        Self::ColonTerminated {
            max_len: default_max_colon_len(),
        }
    }
}

fn default_max_title_chars() -> usize {
    MAX_HEADING_TITLE_CHARS
}

fn default_list_item_guard() -> bool {
    true
}

fn default_min_caps_ratio() -> f64 {
    0.65
}

fn default_min_caps_len() -> usize {
    7
}

fn default_max_caps_len() -> usize {
    80
}

fn default_min_caps_words() -> usize {
    2
}

fn default_max_colon_len() -> usize {
    100
}

/// Canonical methodology section names.
#[must_use]
pub fn default_heading_keywords() -> Vec<String> {
    [
        "scope",
        "applicability",
        "scope and applicability",
        "definitions",
        "monitoring",
        "monitoring methodology",
        "baseline",
        "baseline scenario",
        "project boundary",
        "leakage",
        "additionality",
        "data and parameters",
        "equations",
        "annexes",
        "references",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
