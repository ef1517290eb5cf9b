//! Ordered registry of heading matchers.

use super::strategy::HeadingMatcher;
use super::types::HeadingMatch;

/// Heading matchers in priority order; the first match wins.
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    matchers: Vec<Box<dyn HeadingMatcher>>,
}

impl MatcherRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matcher at the lowest priority.
    pub fn register(&mut self, matcher: Box<dyn HeadingMatcher>) {
        self.matchers.push(matcher);
    }

    /// First matcher that accepts the line, with its name.
    #[must_use]
    pub fn first_match(&self, line: &str) -> Option<(&'static str, HeadingMatch)> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.match_line(line).map(|m| (matcher.name(), m)))
    }

    /// Names of registered matchers in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Number of registered matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether no matchers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::strategy::{AllCapsMatcher, AnnexMatcher, NumberedMatcher};

    #[test]
    fn test_register_and_order() {
        let mut registry = MatcherRegistry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(NumberedMatcher::new(120)));
        registry.register(Box::new(AnnexMatcher));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["numbered", "annex"]);
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = MatcherRegistry::new();
        registry.register(Box::new(AnnexMatcher));
        registry.register(Box::new(AllCapsMatcher::new(0.65, 7, 80, 2)));

        let (name, _) = registry.first_match("APPENDIX A").unwrap();
        assert_eq!(name, "annex");

        let (name, _) = registry.first_match("PROJECT BOUNDARY").unwrap();
        assert_eq!(name, "all_caps");

        assert!(registry.first_match("plain body text").is_none());
    }
}
