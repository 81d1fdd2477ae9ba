use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HotelError;

/// Room classification driving base pricing and occupancy grouping.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomCategory {
    Single,
    Double,
    Suite,
}

impl RoomCategory {
    pub const ALL: [Self; 3] = [Self::Single, Self::Double, Self::Suite];

    /// Position in [`RoomCategory::ALL`], used to key fixed-size tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Single => 0,
            Self::Double => 1,
            Self::Suite => 2,
        }
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "SINGLE"),
            Self::Double => write!(f, "DOUBLE"),
            Self::Suite => write!(f, "SUITE"),
        }
    }
}

impl FromStr for RoomCategory {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Ok(Self::Single),
            "DOUBLE" => Ok(Self::Double),
            "SUITE" => Ok(Self::Suite),
            other => Err(HotelError::validation(format!(
                "unknown room category '{other}', expected SINGLE, DOUBLE or SUITE"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: u32,
    pub category: RoomCategory,
    #[serde(default = "default_available")]
    pub available: bool,
    pub hotel_id: u32,
}

fn default_available() -> bool {
    true
}
