//! Heading rule presets and compilation into a matcher registry.

use super::registry::MatcherRegistry;
use super::strategy::{
    AllCapsMatcher, AnnexMatcher, ColonTerminatedMatcher, KeywordMatcher, NumberedMatcher,
    PatternMatcher, RomanMatcher,
};
use super::types::HeadingRule;
use crate::error::Result;

/// Default heading rules, in priority order:
///
/// ```text
/// numbered   4.2 Baseline scenario
/// annex      Appendix A
/// all_caps   PROJECT BOUNDARY
/// keyword    Data and parameters
/// ```
#[must_use]
pub fn default_heading_rules() -> Vec<HeadingRule> {
    vec![
        HeadingRule::numbered(),
        HeadingRule::Annex,
        HeadingRule::all_caps(),
        HeadingRule::keyword(),
    ]
}

/// Default rules plus roman-numeral and colon-terminated headings.
#[must_use]
pub fn permissive_heading_rules() -> Vec<HeadingRule> {
    let mut rules = default_heading_rules();
    rules.insert(1, HeadingRule::roman());
    rules.push(HeadingRule::colon_terminated());
    rules
}

/// Compile heading rules into a registry, keeping their order.
pub fn build_registry(rules: &[HeadingRule]) -> Result<MatcherRegistry> {
    let mut registry = MatcherRegistry::new();

    for rule in rules {
        match rule {
            HeadingRule::Numbered {
                max_title_chars,
                list_item_guard,
            } => {
                registry.register(Box::new(
                    NumberedMatcher::new(*max_title_chars).with_list_item_guard(*list_item_guard),
                ));
            }
            HeadingRule::Annex => registry.register(Box::new(AnnexMatcher)),
            HeadingRule::AllCaps {
                min_ratio,
                min_len,
                max_len,
                min_words,
            } => registry.register(Box::new(AllCapsMatcher::new(
                *min_ratio, *min_len, *max_len, *min_words,
            ))),
            HeadingRule::Keyword { keywords } => {
                registry.register(Box::new(KeywordMatcher::new(keywords)));
            }
            HeadingRule::Roman { max_title_chars } => {
                registry.register(Box::new(RomanMatcher::new(*max_title_chars)));
            }
            HeadingRule::ColonTerminated { max_len } => {
                registry.register(Box::new(ColonTerminatedMatcher::new(*max_len)));
            }
            HeadingRule::Pattern { regex } => {
                registry.register(Box::new(PatternMatcher::new(regex)?));
            }
        }
    }

    Ok(registry)
}
