use czml_model::DocumentArray;
use serde::{Serialize, Serializer};

use crate::error::LoadError;

/// Outcome of loading one (or a merged set of) source(s).
///
/// Serializes as `{"success": bool, "data"?: [...], "error"?: "...", "source": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub source: String,
    pub outcome: Result<DocumentArray, LoadError>,
}

impl LoadResult {
    pub fn success(source: impl Into<String>, data: DocumentArray) -> Self {
        Self {
            source: source.into(),
            outcome: Ok(data),
        }
    }

    pub fn failure(source: impl Into<String>, error: LoadError) -> Self {
        Self {
            source: source.into(),
            outcome: Err(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    #[must_use]
    pub fn data(&self) -> Option<&DocumentArray> {
        self.outcome.as_ref().ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<DocumentArray, LoadError> {
        self.outcome
    }
}

#[derive(Serialize)]
struct WireLoadResult<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a DocumentArray>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    source: &'a str,
}

impl Serialize for LoadResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireLoadResult {
            success: self.is_success(),
            data: self.data(),
            error: self.error().map(ToString::to_string),
            source: &self.source,
        }
        .serialize(serializer)
    }
}
