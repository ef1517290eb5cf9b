//! Running header and footer detection by line frequency.

use std::collections::HashMap;

/// Occurrence counts of trimmed, non-empty lines in one document.
///
/// Lines counted more than `threshold` times are treated as running headers
/// or footers. They stay in the line sequence but are ignored for heading
/// detection and section bodies. The table is scoped to a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    threshold: Option<usize>,
}

impl FrequencyTable {
    /// Count lines; `threshold` of `None` disables suppression.
    #[must_use]
    pub fn build<'a>(lines: impl IntoIterator<Item = &'a str>, threshold: Option<usize>) -> Self {
        let Some(threshold) = threshold else {
            return Self::disabled();
        };

        let mut counts: HashMap<String, usize> = HashMap::new();
        for line in lines {
            let key = line.trim();
            if !key.is_empty() {
                *counts.entry(key.to_string()).or_default() += 1;
            }
        }

        Self {
            counts,
            threshold: Some(threshold),
        }
    }

    /// A table that never flags any line.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Number of occurrences of the trimmed line.
    #[must_use]
    pub fn count(&self, line: &str) -> usize {
        self.counts.get(line.trim()).copied().unwrap_or(0)
    }

    /// Whether the line is a running header or footer.
    #[must_use]
    pub fn is_running_header(&self, line: &str) -> bool {
        self.threshold
            .is_some_and(|threshold| self.count(line) > threshold)
    }

    /// All running header lines, sorted.
    #[must_use]
    pub fn running_headers(&self) -> Vec<&str> {
        let mut headers: Vec<&str> = self
            .counts
            .keys()
            .map(String::as_str)
            .filter(|line| self.is_running_header(line))
            .collect();
        headers.sort_unstable();
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repeated(line: &str, times: usize) -> Vec<&str> {
        std::iter::repeat(line).take(times).collect()
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let lines = repeated("CDM Executive Board", 5);
        let table = FrequencyTable::build(lines.iter().copied(), Some(5));
        assert_eq!(table.count("CDM Executive Board"), 5);
        assert!(!table.is_running_header("CDM Executive Board"));

        let lines = repeated("CDM Executive Board", 6);
        let table = FrequencyTable::build(lines.iter().copied(), Some(5));
        assert!(table.is_running_header("CDM Executive Board"));
    }

    #[test]
    fn test_counts_trimmed_lines() {
        let lines = ["  Header", "Header  ", "Header", "", "   "];
        let table = FrequencyTable::build(lines, Some(2));
        assert_eq!(table.count("Header"), 3);
        assert_eq!(table.count(""), 0);
        assert!(table.is_running_header(" Header "));
    }

    #[test]
    fn test_disabled_never_flags() {
        let lines = repeated("Header", 50);
        let table = FrequencyTable::build(lines.iter().copied(), None);
        assert!(!table.is_running_header("Header"));
        assert!(table.running_headers().is_empty());
    }

    #[test]
    fn test_running_headers_sorted() {
        let mut lines = repeated("Zeta footer", 3);
        lines.extend(repeated("Alpha header", 3));
        lines.push("Body line");
        let table = FrequencyTable::build(lines.iter().copied(), Some(2));
        assert_eq!(table.running_headers(), vec!["Alpha header", "Zeta footer"]);
    }
}
