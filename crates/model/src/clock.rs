use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;

/// How the simulation clock behaves when it reaches the end of its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockRange {
    Unbounded,
    Clamped,
    LoopStop,
}

impl ClockRange {
    pub const ALL: [Self; 3] = [Self::Unbounded, Self::Clamped, Self::LoopStop];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unbounded => "UNBOUNDED",
            Self::Clamped => "CLAMPED",
            Self::LoopStop => "LOOP_STOP",
        }
    }
}

impl fmt::Display for ClockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| ModelError::UnknownClockRange(s.to_string()))
    }
}

/// Simulation time window carried by the document packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    /// `"<start>/<end>"` in ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ClockRange>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Clock {
    /// Splits the interval into its start and end halves.
    #[must_use]
    pub fn interval_bounds(&self) -> Option<(&str, &str)> {
        self.interval.as_deref()?.split_once('/')
    }
}
