//! Rule identifier schemes.

use serde::{Deserialize, Serialize};

use crate::types::MethodologyMeta;

/// How rule identifiers are formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// `R-S-3-002`: section id plus per-section counter.
    #[default]
    SectionScoped,

    /// `AR-AMS0001.1.0.R-3-002`: methodology id and version, section
    /// number and per-section counter.
    Namespaced,
}

impl IdScheme {
    /// Format a rule id.
    ///
    /// The namespaced scheme needs methodology metadata; without it the
    /// section-scoped form is used.
    ///
    /// # Examples
    /// ```
    /// use methodology_extractor::rules::IdScheme;
    ///
    /// assert_eq!(IdScheme::SectionScoped.rule_id("S-3", 2, None), "R-S-3-002");
    /// ```
    #[must_use]
    pub fn rule_id(&self, section_id: &str, counter: usize, method: Option<&MethodologyMeta>) -> String {
        match (self, method) {
            (Self::Namespaced, Some(method)) => {
                let suffix = section_id
                    .split_once('-')
                    .map_or(section_id, |(_, suffix)| suffix);
                format!("{}.{}.R-{suffix}-{counter:03}", method.id, method.version)
            }
            _ => format!("R-{section_id}-{counter:03}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> MethodologyMeta {
        MethodologyMeta {
            id: "AR-AMS0001".to_string(),
            version: "1.0".to_string(),
            title: None,
        }
    }

    #[test]
    fn test_section_scoped() {
        assert_eq!(IdScheme::SectionScoped.rule_id("S-1", 1, None), "R-S-1-001");
        assert_eq!(
            IdScheme::SectionScoped.rule_id("S-12", 1234, Some(&meta())),
            "R-S-12-1234"
        );
    }

    #[test]
    fn test_namespaced() {
        assert_eq!(
            IdScheme::Namespaced.rule_id("S-3", 2, Some(&meta())),
            "AR-AMS0001.1.0.R-3-002"
        );
    }

    #[test]
    fn test_namespaced_without_method_falls_back() {
        assert_eq!(IdScheme::Namespaced.rule_id("S-3", 2, None), "R-S-3-002");
    }

    #[test]
    fn test_yaml_names() {
        let scheme: IdScheme = serde_yaml_ng::from_str("namespaced").unwrap();
        assert_eq!(scheme, IdScheme::Namespaced);
        assert_eq!(
            serde_yaml_ng::to_string(&IdScheme::SectionScoped).unwrap().trim(),
            "section_scoped"
        );
    }
}
