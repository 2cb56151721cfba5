//! Client-side validation results
//!
//! Errors are keyed by the wire field name so they can be matched against
//! the `errors` map the API returns for rejected payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name → list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message for a field, for inline display under an input
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Required text check. Whitespace-only counts as missing.
pub fn require_text(errors: &mut ValidationErrors, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    }
}

/// Upper bound on character count (not bytes; Arabic text is multi-byte)
pub fn max_chars(errors: &mut ValidationErrors, field: &str, value: &str, max: usize, label: &str) {
    if value.chars().count() > max {
        errors.add(field, format!("{label} must not exceed {max} characters"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name.ar", "   ", "Arabic name");
        assert_eq!(errors.first("name.ar"), Some("Arabic name is required"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_max_chars_counts_characters() {
        let mut errors = ValidationErrors::new();
        // 5 Arabic letters are 10 bytes but only 5 chars
        max_chars(&mut errors, "name.ar", "مرحبا", 5, "Arabic name");
        assert!(errors.is_empty());
        max_chars(&mut errors, "name.ar", "مرحبا!", 5, "Arabic name");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("a", "first");
        errors.add("b", "second");
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
