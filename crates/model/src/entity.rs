use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;

/// Capability keys that mark a packet as carrying a visual entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Point,
    Label,
    Billboard,
    Polyline,
    Polygon,
    Ellipse,
    Box,
    Cylinder,
    Corridor,
    Ellipsoid,
    Model,
    Path,
    Rectangle,
    Wall,
    Tileset,
}

impl EntityType {
    /// Every known entity type, in the order packets are scanned for them.
    pub const ALL: [Self; 15] = [
        Self::Point,
        Self::Label,
        Self::Billboard,
        Self::Polyline,
        Self::Polygon,
        Self::Ellipse,
        Self::Box,
        Self::Cylinder,
        Self::Corridor,
        Self::Ellipsoid,
        Self::Model,
        Self::Path,
        Self::Rectangle,
        Self::Wall,
        Self::Tileset,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Label => "label",
            Self::Billboard => "billboard",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Ellipse => "ellipse",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::Corridor => "corridor",
            Self::Ellipsoid => "ellipsoid",
            Self::Model => "model",
            Self::Path => "path",
            Self::Rectangle => "rectangle",
            Self::Wall => "wall",
            Self::Tileset => "tileset",
        }
    }

    /// Entities that cannot be placed without a `position` on the same packet.
    #[must_use]
    pub const fn requires_position(self) -> bool {
        matches!(
            self,
            Self::Point | Self::Label | Self::Billboard | Self::Ellipse | Self::Model
        )
    }

    /// Entity types whose keys are present on a raw packet object, in `ALL` order.
    pub fn present_in(obj: &Map<String, Value>) -> impl Iterator<Item = Self> + '_ {
        Self::ALL
            .into_iter()
            .filter(move |kind| obj.contains_key(kind.as_str()))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownEntityType(s.to_string()))
    }
}
