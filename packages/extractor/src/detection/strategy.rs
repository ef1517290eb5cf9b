//! Heading matchers, one per heuristic.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::types::HeadingMatch;
use crate::error::{ExtractorError, Result};
use crate::text::collapse_whitespace;

/// Numbered heading: dotted number, optional `.` or `)`, then the title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)[.)]?(?:\s+(.*))?$").expect("valid regex")
});

/// Annex or appendix marker followed by a letter, roman numeral or number.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANNEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:annex|appendix)\s+([A-Z]|[IVXLC]+|\d+(?:\.\d+)*)\b(.*)$")
        .expect("valid regex")
});

/// Roman numeral followed by `.` or `)` and a title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ROMAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([IVXLCDM]+)([.)])\s+\S").expect("valid regex"));

/// Trait for heading heuristics.
///
/// Implementations receive a trimmed, non-empty line and decide whether it
/// starts a new section.
pub trait HeadingMatcher: fmt::Debug + Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Match a trimmed line.
    fn match_line(&self, line: &str) -> Option<HeadingMatch>;
}

/// Matches `4.2 Title`, `1. Title` and `3) Title`.
///
/// Titles that run too long are list items, not headings, and fall through
/// to the next matcher. With the list item guard on (the default), so are
/// titles that end like a sentence or do not start with a letter.
#[derive(Debug)]
pub struct NumberedMatcher {
    max_title_chars: usize,
    list_item_guard: bool,
}

impl NumberedMatcher {
    /// Create a numbered heading matcher with the list item guard on.
    #[must_use]
    pub fn new(max_title_chars: usize) -> Self {
        Self {
            max_title_chars,
            list_item_guard: true,
        }
    }

    /// Turn the list item guard on or off.
    #[must_use]
    pub fn with_list_item_guard(mut self, enabled: bool) -> Self {
        self.list_item_guard = enabled;
        self
    }
}

/// Whether a title reads like a list item or sentence rather than a heading.
fn looks_like_list_item(title: &str) -> bool {
    !title.chars().next().is_some_and(char::is_alphabetic) || title.ends_with(['.', ';', ','])
}

impl HeadingMatcher for NumberedMatcher {
    fn name(&self) -> &'static str {
        "numbered"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let caps = NUMBERED_PATTERN.captures(line)?;
        let number = caps.get(1)?.as_str();
        let title = caps.get(2).map_or("", |m| m.as_str().trim());

        if title.is_empty() || title.chars().count() > self.max_title_chars {
            return None;
        }
        if self.list_item_guard && looks_like_list_item(title) {
            return None;
        }

        Some(HeadingMatch::numbered(number, title))
    }
}

/// Matches `Annex 1`, `APPENDIX A` and `Appendix II: Title`.
#[derive(Debug)]
pub struct AnnexMatcher;

impl HeadingMatcher for AnnexMatcher {
    fn name(&self) -> &'static str {
        "annex"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let caps = ANNEX_PATTERN.captures(line)?;
        let rest = caps.get(2).map_or("", |m| m.as_str().trim());

        // "Annex 1 provides default values." is a sentence about the annex.
        if rest.ends_with('.') {
            return None;
        }

        Some(HeadingMatch::titled(line))
    }
}

/// Matches mostly-uppercase lines of a few words.
#[derive(Debug)]
pub struct AllCapsMatcher {
    min_ratio: f64,
    min_len: usize,
    max_len: usize,
    min_words: usize,
}

impl AllCapsMatcher {
    /// Create an all-caps matcher.
    #[must_use]
    pub fn new(min_ratio: f64, min_len: usize, max_len: usize, min_words: usize) -> Self {
        Self {
            min_ratio,
            min_len,
            max_len,
            min_words,
        }
    }
}

/// Share of uppercase letters among all letters; 0.0 without letters.
fn uppercase_ratio(line: &str) -> f64 {
    let (letters, upper) = line
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    if letters == 0 {
        return 0.0;
    }
    upper as f64 / letters as f64
}

impl HeadingMatcher for AllCapsMatcher {
    fn name(&self) -> &'static str {
        "all_caps"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let len = line.chars().count();
        if len < self.min_len || len > self.max_len {
            return None;
        }
        if !line.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }
        if line.split_whitespace().count() < self.min_words {
            return None;
        }
        if uppercase_ratio(line) < self.min_ratio {
            return None;
        }
        Some(HeadingMatch::titled(line))
    }
}

/// Matches canonical section names against the whole line.
#[derive(Debug)]
pub struct KeywordMatcher {
    keywords: HashSet<String>,
}

impl KeywordMatcher {
    /// Create a keyword matcher.
    #[must_use]
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| collapse_whitespace(k).to_lowercase())
                .collect(),
        }
    }
}

impl HeadingMatcher for KeywordMatcher {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let key = collapse_whitespace(line).to_lowercase();
        self.keywords
            .contains(&key)
            .then(|| HeadingMatch::titled(line))
    }
}

/// Matches `IV. Baseline` and `II) Scope`.
///
/// Requires a `.` or `)` after the numeral so sentences starting with "I"
/// are not headings.
#[derive(Debug)]
pub struct RomanMatcher {
    max_title_chars: usize,
}

impl RomanMatcher {
    /// Create a roman numeral matcher.
    #[must_use]
    pub fn new(max_title_chars: usize) -> Self {
        Self { max_title_chars }
    }
}

impl HeadingMatcher for RomanMatcher {
    fn name(&self) -> &'static str {
        "roman"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        if line.chars().count() > self.max_title_chars || line.ends_with(['.', ';', ',']) {
            return None;
        }
        let caps = ROMAN_PATTERN.captures(line)?;
        let numeral = caps.get(1)?.as_str();
        let terminator = caps.get(2)?.as_str();

        // Single letters are only numerals as `I.`, `V.` or `X.`; `C)` and
        // `D.` start lettered list items.
        if numeral.len() == 1 && !(terminator == "." && matches!(numeral, "I" | "V" | "X")) {
            return None;
        }
        Some(HeadingMatch::titled(line))
    }
}

/// Matches short lines ending in a colon.
#[derive(Debug)]
pub struct ColonTerminatedMatcher {
    max_len: usize,
}

impl ColonTerminatedMatcher {
    /// Create a colon-terminated matcher.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl HeadingMatcher for ColonTerminatedMatcher {
    fn name(&self) -> &'static str {
        "colon_terminated"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let title = line.strip_suffix(':')?.trim_end();
        if line.chars().count() > self.max_len {
            return None;
        }
        if !title.chars().next().is_some_and(char::is_alphanumeric) {
            return None;
        }
        Some(HeadingMatch::titled(title))
    }
}

/// Matches a user-supplied regex.
///
/// The `number` and `title` named groups are used when present; otherwise
/// the whole line is the title.
#[derive(Debug)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a pattern matcher.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| ExtractorError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }
}

impl HeadingMatcher for PatternMatcher {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn match_line(&self, line: &str) -> Option<HeadingMatch> {
        let caps = self.regex.captures(line)?;
        let title = caps.name("title").map_or(line, |m| m.as_str()).trim();
        if title.is_empty() {
            return None;
        }
        let number = caps
            .name("number")
            .map(|m| m.as_str().trim())
            .filter(|n| !n.is_empty())
            .map(String::from);
        Some(HeadingMatch {
            number,
            title: title.to_string(),
        })
    }
}
