//! Extraction pipeline that ties all components together.

use std::path::{Path, PathBuf};

use crate::config::{CompiledConfig, ExtractionConfig};
use crate::error::Result;
use crate::input::{load_input, read_meta, TextInput};
use crate::output::save_extraction;
use crate::sections::SectionLayout;
use crate::text::{FrequencyTable, NormalizedDocument};
use crate::types::{Extraction, MethodologyMeta, RunContext};

/// Runs normalization, heading detection, section building and rule
/// extraction with one compiled configuration.
///
/// Each call to [`Extractor::extract`] is an isolated run: the frequency
/// table, heading list and dedup set never outlive it.
#[derive(Debug)]
pub struct Extractor {
    config: CompiledConfig,
}

impl Extractor {
    /// Compile a configuration into an extractor.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            config: config.compile()?,
        })
    }

    /// Normalize raw text and count running headers.
    ///
    /// Whole-document text uses the running header threshold, per-page
    /// text the (usually disabled) page header threshold.
    #[must_use]
    pub fn normalize(&self, input: &TextInput) -> (NormalizedDocument, FrequencyTable) {
        let (doc, threshold) = match input {
            TextInput::Document(text) => (
                NormalizedDocument::from_text(text),
                self.config.running_header_threshold,
            ),
            TextInput::Pages(pages) => (
                NormalizedDocument::from_pages(pages),
                self.config.page_header_threshold,
            ),
        };
        let headers = doc.frequency_table(threshold);
        (doc, headers)
    }

    /// Detect headings and build sections.
    #[must_use]
    pub fn segment(&self, doc: &NormalizedDocument, headers: &FrequencyTable) -> SectionLayout {
        let headings = self.config.detector.detect(doc, headers);
        crate::sections::build_sections(doc, &headings, headers)
    }

    /// Run the full pipeline on raw text.
    #[must_use]
    pub fn extract(&self, input: &TextInput, context: &RunContext) -> Extraction {
        let (doc, headers) = self.normalize(input);
        if doc.is_empty() {
            tracing::warn!(source = %context.source.document, "Input contains no text");
        }

        let layout = self.segment(&doc, &headers);
        let rules = self.config.rules.extract(&doc, &layout, &headers, context);
        let sections = layout.into_sections();

        tracing::info!(
            source = %context.source.document,
            sections = sections.len(),
            rules = rules.len(),
            "Extraction complete"
        );

        Extraction { sections, rules }
    }

    /// Run the pipeline on ordered per-page text.
    #[must_use]
    pub fn extract_pages<S: AsRef<str>>(&self, pages: &[S], context: &RunContext) -> Extraction {
        let pages = pages.iter().map(|p| p.as_ref().to_string()).collect();
        self.extract(&TextInput::Pages(pages), context)
    }

    /// Run the pipeline on whole-document text.
    #[must_use]
    pub fn extract_text(&self, text: &str, context: &RunContext) -> Extraction {
        self.extract(&TextInput::Document(text.to_string()), context)
    }
}

/// Where to read input and write artifacts for one methodology directory.
#[derive(Debug, Clone, Default)]
pub struct MethodologyOptions {
    /// Whole-document text file instead of `txt/source.txt`.
    pub text: Option<PathBuf>,

    /// Directory of page files instead of `txt/`.
    pub pages: Option<PathBuf>,

    /// Output directory; defaults to the methodology directory.
    pub output: Option<PathBuf>,

    /// Source document name recorded in every rule.
    pub source: Option<String>,
}

/// Result of processing one methodology directory.
#[derive(Debug, Clone)]
pub struct MethodologyRun {
    /// Metadata from `META.json`.
    pub meta: MethodologyMeta,

    /// Extracted sections and rules.
    pub extraction: Extraction,

    /// Written sections artifact.
    pub sections_path: PathBuf,

    /// Written rules artifact.
    pub rules_path: PathBuf,
}

/// Source name recorded in rules when none is given: the input path
/// relative to the methodology directory.
fn default_source_name(method_dir: &Path, input_path: &Path) -> String {
    input_path
        .strip_prefix(method_dir)
        .unwrap_or(input_path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Read, extract and write one methodology directory.
///
/// # Arguments
/// * `extractor` - Compiled extractor
/// * `method_dir` - Directory containing `META.json` and raw text
/// * `options` - Input and output overrides
///
/// # Returns
/// The metadata, extraction and written artifact paths
pub fn process_methodology(
    extractor: &Extractor,
    method_dir: &Path,
    options: &MethodologyOptions,
) -> Result<MethodologyRun> {
    let meta = read_meta(method_dir)?;
    let input = load_input(method_dir, options.text.as_deref(), options.pages.as_deref())?;

    let source = options
        .source
        .clone()
        .unwrap_or_else(|| default_source_name(method_dir, &input.path));
    let context = RunContext::new(source).with_method(meta.clone());

    tracing::debug!(
        method_id = %meta.id,
        version = %meta.version,
        input = %input.path.display(),
        "Processing methodology"
    );
    let extraction = extractor.extract(&input.text, &context);

    let output_dir = options.output.as_deref().unwrap_or(method_dir);
    let (sections_path, rules_path) = save_extraction(&extraction, output_dir)?;

    Ok(MethodologyRun {
        meta,
        extraction,
        sections_path,
        rules_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleType;
    use pretty_assertions::assert_eq;

    fn extractor() -> Extractor {
        Extractor::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_default_source_name() {
        assert_eq!(
            default_source_name(Path::new("/m/AR"), Path::new("/m/AR/txt/source.txt")),
            "txt/source.txt"
        );
        assert_eq!(
            default_source_name(Path::new("/m/AR"), Path::new("/other/file.txt")),
            "/other/file.txt"
        );
    }

    #[test]
    fn test_running_headers_only_in_document_mode() {
        let mut text = String::new();
        for page in 0..6 {
            text.push_str(&format!("METHODOLOGY PANEL REPORT\nBody line {page}.\n\u{000C}"));
        }

        let (_, headers) = extractor().normalize(&TextInput::Document(text.clone()));
        assert!(headers.is_running_header("METHODOLOGY PANEL REPORT"));

        let pages: Vec<String> = text.split('\u{000C}').map(String::from).collect();
        let (_, headers) = extractor().normalize(&TextInput::Pages(pages));
        assert!(!headers.is_running_header("METHODOLOGY PANEL REPORT"));
    }

    #[test]
    fn test_extract_scenario() {
        let extraction = extractor().extract_pages(
            &[
                "1. Scope\nThis section defines scope.\n2. Monitoring\nThe operator shall monitor emissions monthly.\nData shall be recorded.",
            ],
            &RunContext::new("source.pdf"),
        );

        let titles: Vec<&str> = extraction.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Scope", "Monitoring"]);
        assert!(extraction
            .rules
            .iter()
            .any(|r| r.rule_type == RuleType::Monitoring && r.text.contains("monitor")));
        assert!(extraction.rules.iter().all(|r| r.section_id == "S-2"));
    }

    #[test]
    fn test_sentence_across_page_break_excludes_marker() {
        let extraction = extractor().extract_text(
            "1 Monitoring\nThe operator shall\nPage 1 of 2\n\u{000C}monitor emissions monthly.\n",
            &RunContext::new("source.txt"),
        );

        assert_eq!(extraction.rules.len(), 1);
        let rule = &extraction.rules[0];
        assert_eq!(rule.text, "The operator shall monitor emissions monthly.");
        assert_eq!(rule.page, 1);
        let monitoring = extraction.section(&rule.section_id).unwrap();
        assert!(!monitoring.text.contains("Page 1 of 2"));
        assert_eq!((monitoring.page_start, monitoring.page_end), (1, 2));
    }

    #[test]
    fn test_permissive_lettered_list_stays_in_body() {
        let permissive = Extractor::new(&ExtractionConfig::permissive()).unwrap();
        let extraction = permissive.extract_text(
            "A) record fuel use\nB) measure flow\nC) calculate emissions\nD) archive data",
            &RunContext::new("source.txt"),
        );

        assert_eq!(extraction.sections.len(), 1);
        let prelude = &extraction.sections[0];
        assert_eq!(prelude.title, "Prelude");
        assert!(prelude.text.contains("C) calculate emissions"));
        assert!(prelude.text.ends_with("D) archive data"));
    }

    #[test]
    fn test_extract_empty_text() {
        let extraction = extractor().extract_text("", &RunContext::new("empty.txt"));
        assert_eq!(extraction.sections.len(), 1);
        assert!(extraction.is_placeholder_only());
    }
}
