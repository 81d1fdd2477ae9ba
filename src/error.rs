use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Invalid date range: end {end} must be after start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Data integrity fault: reservation {reservation_id} references unknown room {room_id}")]
    DataIntegrity { reservation_id: u32, room_id: u32 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl HotelError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HotelError>;
