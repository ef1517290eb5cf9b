//! Obligation rule extraction.
//!
//! Section bodies are split into chunks (sentences or list items), filtered
//! by obligation keywords, classified by topic, deduplicated by normalized
//! text and numbered per section.

mod chunker;
mod classify;
mod extractor;
mod ids;

use serde::{Deserialize, Serialize};

pub use chunker::{chunk_lines, scan_lines, strip_bullet, Chunk};
pub use classify::{
    compile_obligation_pattern, default_classification, default_obligation_keywords,
    ClassificationStep, Classifier,
};
pub use extractor::{label_for, RuleExtractor};
pub use ids::IdScheme;

/// How rule candidates are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    /// Sentences and list items within each section body.
    #[default]
    Chunked,

    /// Every sufficiently long line of the document, attributed to the
    /// section whose span contains it.
    LineScan,
}
