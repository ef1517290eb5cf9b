//! Methodology Extractor - Derive sections and obligation rules from
//! methodology document text.
//!
//! This crate takes raw text extracted from a methodology PDF (one string
//! per page, or one whole-document string with form feeds between pages)
//! and derives an ordered list of sections plus a deduplicated list of
//! classified obligation rules anchored to those sections.
//!
//! # Example
//!
//! ```
//! use methodology_extractor::{ExtractionConfig, Extractor, RunContext};
//!
//! let extractor = Extractor::new(&ExtractionConfig::default()).unwrap();
//! let extraction = extractor.extract_pages(
//!     &["1. Scope\nThis section defines scope.\n2. Monitoring\nThe operator shall monitor emissions monthly."],
//!     &RunContext::new("source.pdf"),
//! );
//!
//! assert_eq!(extraction.sections.len(), 2);
//! assert_eq!(extraction.rules[0].id, "R-S-2-001");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Constants, validation and the declarative extraction configuration
//! - [`types`]: Core data types (Section, Rule, MethodologyMeta, etc.)
//! - [`error`]: Error types and Result alias
//! - [`text`]: Text normalization, running header counts and the page index
//! - [`detection`]: Heading matchers and the boundary detector
//! - [`sections`]: Section building and line span lookup
//! - [`rules`]: Chunking, classification, id schemes and rule extraction
//! - [`input`]: Reading META.json and raw text
//! - [`output`]: JSON artifact writing and loading
//! - [`cli`]: Command-line interface
//! - [`extractor`]: Pipeline that ties the stages together

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod extractor;
pub mod input;
pub mod output;
pub mod rules;
pub mod sections;
pub mod text;
pub mod types;

// Re-export main entry points
pub use extractor::{process_methodology, Extractor, MethodologyOptions, MethodologyRun};

// Re-export commonly used items
pub use config::{validate_method_id, validate_version, ExtractionConfig};
pub use error::{ExtractorError, Result};
pub use types::{Extraction, MethodologyMeta, Rule, RuleSource, RuleType, RunContext, Section};
