use std::fmt;

use czml_model::EntityType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks overall validity.
    Error,
    /// Advisory only.
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic, located by a JSON-pointer-like path such as `[3].polygon.width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{} at {}: {}", self.severity, self.path, self.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
    /// Structurally valid packets, the document packet included.
    pub packet_count: usize,
    pub has_document: bool,
    pub has_clock: bool,
    /// De-duplicated, in first-seen order.
    pub entity_types: Vec<EntityType>,
}

impl ValidationResult {
    /// A result carrying one top-level error and nothing else.
    pub(crate) fn fatal(message: &str) -> Self {
        let mut diagnostics = Diagnostics::default();
        diagnostics.error("", message);
        let (errors, warnings) = diagnostics.into_parts();
        Self {
            valid: false,
            errors,
            warnings,
            packet_count: 0,
            has_document: false,
            has_clock: false,
            entity_types: Vec::new(),
        }
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Accumulates diagnostics split by severity, preserving discovery order in each.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl Diagnostics {
    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    pub(crate) fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationError {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    pub(crate) fn into_parts(self) -> (Vec<ValidationError>, Vec<ValidationError>) {
        (self.errors, self.warnings)
    }
}
