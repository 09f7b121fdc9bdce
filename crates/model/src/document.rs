use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::packet::Packet;

/// Id of the packet that carries document-level metadata.
pub const DOCUMENT_ID: &str = "document";

/// The only format version this crate knows about.
pub const CZML_VERSION: &str = "1.0";

/// String id of a raw packet, if it is an object with a string `id`.
#[must_use]
pub fn packet_id(packet: &Value) -> Option<&str> {
    packet.as_object()?.get("id")?.as_str()
}

#[must_use]
pub fn is_document_packet(packet: &Value) -> bool {
    packet_id(packet) == Some(DOCUMENT_ID)
}

/// Ordered list of raw packets as loaded from a source.
///
/// Packets are kept as JSON values so that malformed entries survive loading and
/// can be reported by validation; [`DocumentArray::packets`] gives the typed view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentArray(Vec<Value>);

impl DocumentArray {
    #[must_use]
    pub const fn new(packets: Vec<Value>) -> Self {
        Self(packets)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Element 0, when it is the document packet.
    #[must_use]
    pub fn document_packet(&self) -> Option<&Value> {
        self.0.first().filter(|packet| is_document_packet(packet))
    }

    /// Typed view of every packet, one result per element.
    pub fn packets(&self) -> impl Iterator<Item = Result<Packet>> + '_ {
        self.0.iter().enumerate().map(|(index, value)| {
            if packet_id(value).is_none() {
                return Err(ModelError::InvalidPacket { index });
            }
            Packet::from_value(value)
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Vec<Value>> for DocumentArray {
    fn from(packets: Vec<Value>) -> Self {
        Self(packets)
    }
}

impl TryFrom<Value> for DocumentArray {
    type Error = ModelError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Array(packets) => Ok(Self(packets)),
            _ => Err(ModelError::NotAnArray),
        }
    }
}

impl From<DocumentArray> for Value {
    fn from(document: DocumentArray) -> Self {
        Self::Array(document.0)
    }
}

impl<'a> IntoIterator for &'a DocumentArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for DocumentArray {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
