//! Configuration constants, validation functions and the declarative
//! extraction configuration.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::detection::{
    default_heading_rules, permissive_heading_rules, BoundaryDetector, HeadingRule,
};
use crate::error::{ExtractorError, Result};
use crate::rules::{
    default_classification, default_obligation_keywords, ClassificationStep, IdScheme,
    RuleExtractor, RuleMode,
};

/// Lines occurring more often than this in one document are running headers or footers.
pub const RUNNING_HEADER_THRESHOLD: usize = 5;

/// Maximum number of characters kept in a rule label.
pub const MAX_LABEL_CHARS: usize = 120;

/// Maximum number of anchor keywords per section.
pub const MAX_ANCHORS: usize = 3;

/// Minimum length of an anchor keyword.
pub const MIN_ANCHOR_LEN: usize = 4;

/// Minimum trimmed line length for line-scan rule candidates.
pub const MIN_LINE_RULE_LEN: usize = 25;

/// Maximum length of a numbered heading title.
///
/// Longer "titles" are numbered list items rather than headings.
pub const MAX_HEADING_TITLE_CHARS: usize = 120;

/// Title of the synthetic section covering text before the first heading.
pub const PRELUDE_TITLE: &str = "Prelude";

/// Text of the rule emitted when a document yields no obligations.
pub const PLACEHOLDER_RULE_TEXT: &str = "Document-level review pending";

/// Sections artifact file name.
pub const SECTIONS_FILE: &str = "sections.rich.json";

/// Rules artifact file name.
pub const RULES_FILE: &str = "rules.rich.json";

/// Methodology metadata file name.
pub const META_FILE: &str = "META.json";

/// Directory holding raw text inside a methodology directory.
pub const TEXT_DIR: &str = "txt";

/// Whole-document raw text file inside [`TEXT_DIR`].
pub const SOURCE_TEXT_FILE: &str = "source.txt";

/// Methodology id pattern: starts alphanumeric, then letters, digits, '.', '_' or '-'.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static METHOD_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// Version pattern: same alphabet as method ids, no whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// Validate a methodology identifier.
///
/// Identifiers become part of namespaced rule ids, so they must not contain
/// whitespace or path separators.
///
/// # Examples
/// ```
/// use methodology_extractor::config::validate_method_id;
///
/// assert!(validate_method_id("AR-AMS0001").is_ok());
/// assert!(validate_method_id("VM0042").is_ok());
/// assert!(validate_method_id("bad id").is_err());
/// ```
pub fn validate_method_id(method_id: &str) -> Result<()> {
    if METHOD_ID_PATTERN.is_match(method_id) {
        Ok(())
    } else {
        Err(ExtractorError::InvalidMethodId(method_id.to_string()))
    }
}

/// Validate a methodology version.
///
/// # Examples
/// ```
/// use methodology_extractor::config::validate_version;
///
/// assert!(validate_version("1.0").is_ok());
/// assert!(validate_version("v03-1").is_ok());
/// assert!(validate_version("").is_err());
/// ```
pub fn validate_version(version: &str) -> Result<()> {
    if VERSION_PATTERN.is_match(version) {
        Ok(())
    } else {
        Err(ExtractorError::InvalidVersion(version.to_string()))
    }
}

/// Rule extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// How candidate rules are produced.
    pub mode: RuleMode,

    /// Regex alternatives for duty terms; matched case-insensitively on word boundaries.
    pub obligation_keywords: Vec<String>,

    /// Ordered classification ladder; first step with a matching substring wins.
    pub classification: Vec<ClassificationStep>,

    /// Minimum trimmed line length in line-scan mode.
    pub min_line_len: usize,

    /// Maximum characters in a rule label.
    pub max_label_chars: usize,

    /// Rule identifier format.
    pub id_scheme: IdScheme,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            mode: RuleMode::Chunked,
            obligation_keywords: default_obligation_keywords(),
            classification: default_classification(),
            min_line_len: MIN_LINE_RULE_LEN,
            max_label_chars: MAX_LABEL_CHARS,
            id_scheme: IdScheme::SectionScoped,
        }
    }
}

/// Declarative extraction configuration.
///
/// Heading rules, obligation keywords and the classification ladder are
/// plain data, so two behaviors differ only by their configuration.
///
/// # Examples
/// ```
/// use methodology_extractor::config::ExtractionConfig;
///
/// let config = ExtractionConfig::from_yaml_str("running_header_threshold: 3\n").unwrap();
/// assert_eq!(config.running_header_threshold, Some(3));
/// assert!(config.compile().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered heading rules; first match wins per line.
    pub headings: Vec<HeadingRule>,

    /// Running header threshold for whole-document input.
    pub running_header_threshold: Option<usize>,

    /// Running header threshold for per-page input (disabled by default).
    pub page_header_threshold: Option<usize>,

    /// Rule extraction settings.
    pub rules: RuleConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            headings: default_heading_rules(),
            running_header_threshold: Some(RUNNING_HEADER_THRESHOLD),
            page_header_threshold: None,
            rules: RuleConfig::default(),
        }
    }
}

impl ExtractionConfig {
    /// Broader preset for noisy whole-document text.
    ///
    /// Adds roman-numeral and colon-terminated headings, scans individual
    /// lines for obligations and namespaces rule ids with the methodology
    /// id and version.
    #[must_use]
    pub fn permissive() -> Self {
        let mut obligation_keywords = default_obligation_keywords();
        obligation_keywords.push("should".to_string());

        Self {
            headings: permissive_heading_rules(),
            running_header_threshold: Some(RUNNING_HEADER_THRESHOLD),
            page_header_threshold: None,
            rules: RuleConfig {
                mode: RuleMode::LineScan,
                obligation_keywords,
                id_scheme: IdScheme::Namespaced,
                ..RuleConfig::default()
            },
        }
    }

    /// Parse a configuration from YAML. Missing fields take default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Compile patterns and check settings.
    ///
    /// # Errors
    /// * `InvalidPattern` if a heading or keyword pattern is not a valid regex
    /// * `InvalidConfig` if a setting cannot produce output
    pub fn compile(&self) -> Result<CompiledConfig> {
        if self.rules.max_label_chars == 0 {
            return Err(ExtractorError::InvalidConfig(
                "rules.max_label_chars must be greater than zero".to_string(),
            ));
        }
        if self.rules.obligation_keywords.is_empty() {
            return Err(ExtractorError::InvalidConfig(
                "rules.obligation_keywords must not be empty".to_string(),
            ));
        }
        if self.running_header_threshold == Some(0) || self.page_header_threshold == Some(0) {
            return Err(ExtractorError::InvalidConfig(
                "running header thresholds must be greater than zero".to_string(),
            ));
        }

        Ok(CompiledConfig {
            detector: BoundaryDetector::from_rules(&self.headings)?,
            rules: RuleExtractor::from_config(&self.rules)?,
            running_header_threshold: self.running_header_threshold,
            page_header_threshold: self.page_header_threshold,
        })
    }
}

/// Configuration with all patterns compiled, ready to run.
#[derive(Debug)]
pub struct CompiledConfig {
    /// Heading detector.
    pub detector: BoundaryDetector,

    /// Rule extractor.
    pub rules: RuleExtractor,

    /// Running header threshold for whole-document input.
    pub running_header_threshold: Option<usize>,

    /// Running header threshold for per-page input.
    pub page_header_threshold: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_method_id_valid() {
        assert!(validate_method_id("AR-AMS0001").is_ok());
        assert!(validate_method_id("VM0042").is_ok());
        assert!(validate_method_id("ACM0002.v19").is_ok());
        assert!(validate_method_id("gs_tpddtec").is_ok());
    }

    #[test]
    fn test_validate_method_id_invalid() {
        assert!(validate_method_id("").is_err());
        assert!(validate_method_id("AR AMS0001").is_err());
        assert!(validate_method_id("../etc").is_err());
        assert!(validate_method_id("-leading").is_err());
        assert!(validate_method_id("a/b").is_err());
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("1.0").is_ok());
        assert!(validate_version("03.1").is_ok());
        assert!(validate_version("v2").is_ok());
        assert!(validate_version("").is_err());
        assert!(validate_version("1 0").is_err());
    }

    #[test]
    fn test_default_config_compiles() {
        assert!(ExtractionConfig::default().compile().is_ok());
        assert!(ExtractionConfig::permissive().compile().is_ok());
    }

    #[test]
    fn test_permissive_differs_from_default() {
        let default = ExtractionConfig::default();
        let permissive = ExtractionConfig::permissive();
        assert!(permissive.headings.len() > default.headings.len());
        assert_eq!(permissive.rules.mode, RuleMode::LineScan);
        assert_eq!(permissive.rules.id_scheme, IdScheme::Namespaced);
        assert!(permissive
            .rules
            .obligation_keywords
            .contains(&"should".to_string()));
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
rules:
  mode: line_scan
  min_line_len: 10
headings:
  - kind: numbered
  - kind: keyword
    keywords: [scope, monitoring]
"#;
        let config = ExtractionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.rules.mode, RuleMode::LineScan);
        assert_eq!(config.rules.min_line_len, 10);
        assert_eq!(config.rules.max_label_chars, MAX_LABEL_CHARS);
        assert_eq!(config.headings.len(), 2);
        assert_eq!(config.running_header_threshold, Some(RUNNING_HEADER_THRESHOLD));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ExtractionConfig::permissive();
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed = ExtractionConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_keyword_pattern() {
        let mut config = ExtractionConfig::default();
        config.rules.obligation_keywords.push("shall(".to_string());
        let err = config.compile().unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidPattern { pattern, .. } if pattern == "shall("));
    }

    #[test]
    fn test_invalid_heading_pattern() {
        let yaml = "headings:\n  - kind: pattern\n    regex: '^(unclosed'\n";
        let config = ExtractionConfig::from_yaml_str(yaml).unwrap();
        assert!(matches!(
            config.compile(),
            Err(ExtractorError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_settings() {
        let mut config = ExtractionConfig::default();
        config.rules.max_label_chars = 0;
        assert!(matches!(
            config.compile(),
            Err(ExtractorError::InvalidConfig(_))
        ));

        let mut config = ExtractionConfig::default();
        config.rules.obligation_keywords.clear();
        assert!(matches!(
            config.compile(),
            Err(ExtractorError::InvalidConfig(_))
        ));

        let mut config = ExtractionConfig::default();
        config.running_header_threshold = Some(0);
        assert!(matches!(
            config.compile(),
            Err(ExtractorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_heading_kind_rejected() {
        let yaml = "headings:\n  - kind: telepathy\n";
        assert!(matches!(
            ExtractionConfig::from_yaml_str(yaml),
            Err(ExtractorError::Yaml(_))
        ));
    }
}
