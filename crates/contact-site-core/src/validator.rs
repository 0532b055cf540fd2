// File: src/validator.rs
// Purpose: Pure per-field and whole-form validation

use std::collections::HashMap;

use crate::email::is_valid_email;
use crate::fields::{FieldFormat, FieldSpec};

/// Validate one raw (untrimmed) value against its spec.
///
/// Rules run in order and the first failure wins: required, minimum length, format.
/// Returns `None` when the value is valid.
pub fn validate_field(raw: &str, spec: &FieldSpec) -> Option<String> {
    let value = raw.trim();

    if value.is_empty() {
        // Empty optional fields skip the remaining rules
        return spec.required_message.map(str::to_string);
    }

    if let Some(min) = spec.min_length {
        if value.chars().count() < min {
            return Some(spec.min_length_message(min));
        }
    }

    match spec.format {
        Some(FieldFormat::Email) if !is_valid_email(value) => {
            Some(FieldFormat::Email.message().to_string())
        }
        _ => None,
    }
}

/// Raw field values keyed by field id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Missing fields read as empty
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Outcome of one validation pass across all fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Field id to error message, in field order. `None` means the field passed.
    pub fields: Vec<(String, Option<String>)>,
}

impl ValidationResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.is_valid
    }

    /// Error for a specific field, if it failed
    pub fn error(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(id, _)| id == field)
            .and_then(|(_, message)| message.as_deref())
    }

    /// Ids of the fields that failed, in field order
    pub fn failing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, message)| message.is_some())
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Run every `FieldSpec` against the supplied values
pub fn validate_values(specs: &[FieldSpec], values: &FieldValues) -> ValidationResult {
    let fields: Vec<(String, Option<String>)> = specs
        .iter()
        .map(|spec| (spec.id.to_string(), validate_field(values.get(spec.id), spec)))
        .collect();

    let is_valid = fields.iter().all(|(_, message)| message.is_none());

    ValidationResult { is_valid, fields }
}
