//! Obligation keyword matching and topic classification.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractorError, Result};
use crate::types::RuleType;

/// One step of the classification ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStep {
    /// Type assigned when the step matches.
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Lowercase substrings; any one of them matches.
    pub any_of: Vec<String>,
}

impl ClassificationStep {
    /// Create a classification step.
    #[must_use]
    pub fn new(rule_type: RuleType, any_of: &[&str]) -> Self {
        Self {
            rule_type,
            any_of: any_of.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Default obligation keyword patterns.
#[must_use]
pub fn default_obligation_keywords() -> Vec<String> {
    [
        "shall",
        "must",
        r"required?",
        r"requirements?",
        r"monitor\w*",
        r"measur\w*",
        r"record\w*",
        r"calculat\w*",
        r"baseline\w*",
        "leakage",
        "additionality",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Default classification ladder.
#[must_use]
pub fn default_classification() -> Vec<ClassificationStep> {
    vec![
        ClassificationStep::new(RuleType::Baseline, &["baseline"]),
        ClassificationStep::new(
            RuleType::Monitoring,
            &["monitor", "measure", "record", "qa/qc"],
        ),
        ClassificationStep::new(RuleType::Leakage, &["leakage"]),
        ClassificationStep::new(
            RuleType::Additionality,
            &["additionality", "barrier", "common practice"],
        ),
    ]
}

/// Compile obligation keywords into one case-insensitive, word-bounded regex.
///
/// Each keyword is checked on its own first so errors name the offending
/// pattern.
pub fn compile_obligation_pattern(keywords: &[String]) -> Result<Regex> {
    for keyword in keywords {
        Regex::new(keyword).map_err(|source| ExtractorError::InvalidPattern {
            pattern: keyword.clone(),
            source,
        })?;
    }

    let alternatives = keywords
        .iter()
        .map(|k| format!("(?:{k})"))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i)\b(?:{alternatives})\b");

    Regex::new(&pattern).map_err(|source| ExtractorError::InvalidPattern { pattern, source })
}

/// Ordered substring ladder over lowercased text.
///
/// Text matching no step is [`RuleType::Unspecified`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    steps: Vec<ClassificationStep>,
}

impl Classifier {
    /// Create a classifier; needles are lowercased.
    #[must_use]
    pub fn new(steps: &[ClassificationStep]) -> Self {
        let steps = steps
            .iter()
            .map(|step| ClassificationStep {
                rule_type: step.rule_type,
                any_of: step.any_of.iter().map(|s| s.to_lowercase()).collect(),
            })
            .collect();
        Self { steps }
    }

    /// Classify a rule text.
    #[must_use]
    pub fn classify(&self, text: &str) -> RuleType {
        let sample = text.to_lowercase();
        self.steps
            .iter()
            .find(|step| step.any_of.iter().any(|needle| sample.contains(needle.as_str())))
            .map_or(RuleType::Unspecified, |step| step.rule_type)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&default_classification())
    }
}
