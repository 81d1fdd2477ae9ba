use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::reservation::Reservation;
use crate::domain::room::RoomRecord;
use crate::error::{HotelError, Result};

/// Rooms and reservations used to seed the in-memory repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// Parse fixture YAML, rejecting reservations that do not span at least one night.
pub fn parse_fixture(yaml: &str) -> Result<Fixture> {
    let fixture: Fixture = serde_yml::from_str(yaml)?;
    if let Some(bad) = fixture
        .reservations
        .iter()
        .find(|r| r.end_date <= r.start_date)
    {
        return Err(HotelError::InvalidRange {
            start: bad.start_date,
            end: bad.end_date,
        });
    }
    Ok(fixture)
}

pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HotelError::Config(format!("failed to read fixture {}: {e}", path.display()))
    })?;
    let fixture = parse_fixture(&content)?;

    tracing::info!(
        rooms = fixture.rooms.len(),
        reservations = fixture.reservations.len(),
        "Loaded fixture from {}",
        path.display()
    );
    Ok(fixture)
}
