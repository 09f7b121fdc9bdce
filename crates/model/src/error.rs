use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("CZML data must be an array")]
    NotAnArray,

    #[error("Packet {index} is not an object with a string id")]
    InvalidPacket { index: usize },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Unknown clock range: {0}")]
    UnknownClockRange(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
