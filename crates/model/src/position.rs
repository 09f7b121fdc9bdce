use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;

pub const CARTOGRAPHIC_DEGREES: &str = "cartographicDegrees";
pub const CARTESIAN: &str = "cartesian";
pub const REFERENCE: &str = "reference";

/// The keys that select a position encoding, in precedence order.
pub const POSITION_KEYS: [&str; 3] = [CARTOGRAPHIC_DEGREES, CARTESIAN, REFERENCE];

/// Where a packet's coordinates come from. Exactly one encoding is allowed.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionKind {
    /// `[lon, lat, height]` or a flattened time-tagged sample list.
    CartographicDegrees(Vec<f64>),
    /// Earth-fixed XYZ, possibly time-tagged.
    Cartesian(Vec<f64>),
    /// `"<packet id>#position"` style pointer.
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    pub kind: PositionKind,
    /// Interpolation settings, epochs and other keys we carry but don't interpret.
    pub extensions: Map<String, Value>,
}

impl Position {
    #[must_use]
    pub fn cartographic(lon: f64, lat: f64, height: f64) -> Self {
        Self {
            kind: PositionKind::CartographicDegrees(vec![lon, lat, height]),
            extensions: Map::new(),
        }
    }

    /// `(lon, lat, height)` when the degrees list looks like a plain triple.
    #[must_use]
    pub fn as_cartographic_triple(&self) -> Option<(f64, f64, f64)> {
        match &self.kind {
            PositionKind::CartographicDegrees(coords) if coords.len() == 3 => {
                Some((coords[0], coords[1], coords[2]))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            PositionKind::Reference(target) => Some(target),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPosition {
    #[serde(
        rename = "cartographicDegrees",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    cartographic_degrees: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cartesian: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(flatten)]
    extensions: Map<String, Value>,
}

impl TryFrom<RawPosition> for Position {
    type Error = ModelError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        let kind = match (raw.cartographic_degrees, raw.cartesian, raw.reference) {
            (Some(coords), None, None) => PositionKind::CartographicDegrees(coords),
            (None, Some(coords), None) => PositionKind::Cartesian(coords),
            (None, None, Some(target)) => PositionKind::Reference(target),
            (None, None, None) => {
                return Err(ModelError::InvalidPosition(
                    "expected one of cartographicDegrees, cartesian, reference".to_string(),
                ))
            }
            _ => {
                return Err(ModelError::InvalidPosition(
                    "only one of cartographicDegrees, cartesian, reference may be set"
                        .to_string(),
                ))
            }
        };
        Ok(Self {
            kind,
            extensions: raw.extensions,
        })
    }
}

impl From<Position> for RawPosition {
    fn from(position: Position) -> Self {
        let mut raw = Self {
            cartographic_degrees: None,
            cartesian: None,
            reference: None,
            extensions: position.extensions,
        };
        match position.kind {
            PositionKind::CartographicDegrees(coords) => raw.cartographic_degrees = Some(coords),
            PositionKind::Cartesian(coords) => raw.cartesian = Some(coords),
            PositionKind::Reference(target) => raw.reference = Some(target),
        }
        raw
    }
}
