//! Heading detection for methodology documents.
//!
//! Each heuristic is a [`HeadingMatcher`]; a [`MatcherRegistry`] holds them
//! in priority order and the [`BoundaryDetector`] applies the registry to
//! every line.

mod config;
mod engine;
mod registry;
mod strategy;
mod types;

pub use config::{build_registry, default_heading_rules, permissive_heading_rules};
pub use engine::BoundaryDetector;
pub use registry::MatcherRegistry;
pub use strategy::{
    AllCapsMatcher, AnnexMatcher, ColonTerminatedMatcher, HeadingMatcher, KeywordMatcher,
    NumberedMatcher, PatternMatcher, RomanMatcher,
};
pub use types::{default_heading_keywords, HeadingCandidate, HeadingMatch, HeadingRule};
