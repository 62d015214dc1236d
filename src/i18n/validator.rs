//! Dictionary completeness validation.
//!
//! Compares a locale's dictionary against a reference dictionary (normally
//! the default locale's) and reports missing keys, extra keys and
//! `{placeholder}` drift. This is an offline report for pre-rendering and
//! review; the content resolver never rejects a dictionary.

use crate::i18n::Dictionary;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys present in the reference but absent from the candidate
    pub errors: Vec<String>,

    /// Extra keys and placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for dictionary completeness.
pub struct DictionaryValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare a candidate dictionary against a reference dictionary.
    ///
    /// # Arguments
    /// * `reference` - The dictionary every locale should match (by key)
    /// * `candidate` - The dictionary under review
    ///
    /// # Returns
    /// A `ValidationReport`; keys are reported in sorted order.
    pub fn compare(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        for key in reference.keys() {
            if candidate.get(key).is_none() {
                report.errors.push(format!("Missing key: {}", key));
            }
        }

        for key in candidate.keys() {
            if reference.get(key).is_none() {
                report.warnings.push(format!("Extra key: {}", key));
            }
        }

        for (key, reference_text) in reference.iter() {
            let Some(candidate_text) = candidate.get(key) else {
                continue;
            };
            let expected = Self::extract_placeholders(reference_text);
            let actual = Self::extract_placeholders(candidate_text);
            if expected != actual {
                report.warnings.push(format!(
                    "Placeholder mismatch in {}: expected {:?}, found {:?}",
                    key, expected, actual
                ));
            }
        }

        report
    }

    /// Extract `{name}` placeholders from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
