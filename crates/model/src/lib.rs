//! # CZML Model
//!
//! Shapes shared by the loader and the validator.
//!
//! A CZML document is a JSON array of packets. Element 0 is, by convention, the
//! document packet (`id == "document"`) holding the display name, format version
//! and an optional simulation clock; every other packet describes an entity.
//!
//! ```text
//! [ {"id": "document", "name": ..., "version": "1.0", "clock": {...}},
//!   {"id": "sat-1", "position": {...}, "point": {...}},
//!   ... ]
//! ```
//!
//! [`DocumentArray`] keeps packets as raw JSON so nothing is lost or rejected at load
//! time. [`Packet`] is the typed view for callers that want checked access.

mod clock;
mod document;
mod entity;
mod error;
mod packet;
mod position;

pub use clock::{Clock, ClockRange};
pub use document::{is_document_packet, packet_id, DocumentArray, CZML_VERSION, DOCUMENT_ID};
pub use entity::EntityType;
pub use error::{ModelError, Result};
pub use packet::{Ellipse, Packet, Point, Polygon, Polyline};
pub use position::{
    Position, PositionKind, CARTESIAN, CARTOGRAPHIC_DEGREES, POSITION_KEYS, REFERENCE,
};
