use std::collections::HashMap;
use thiserror::Error;

/// Request payload failed field-level checks
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }
}

/// Accumulates per-field problems so a client sees all of them at once
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub(crate) fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.errors.entry(field.to_string()).or_insert_with(|| message.to_string());
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                message: "Invalid field format".to_string(),
                field_errors: self.errors,
            })
        }
    }
}

pub(crate) fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}
