use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::room::{RoomCategory, RoomRecord};
use crate::error::{HotelError, Result};
use crate::ports::room_repository::RoomRepository;

#[derive(Debug, Default)]
pub struct InMemoryRooms {
    entries: RwLock<BTreeMap<u32, RoomRecord>>,
}

impl InMemoryRooms {
    /// Seed with existing rooms, keeping their ids.
    pub fn with_rooms(rooms: impl IntoIterator<Item = RoomRecord>) -> Self {
        let entries = rooms.into_iter().map(|r| (r.id, r)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    async fn filtered(&self, predicate: impl Fn(&RoomRecord) -> bool) -> Vec<RoomRecord> {
        self.entries
            .read()
            .await
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRooms {
    async fn create(&self, mut room: RoomRecord) -> Result<RoomRecord> {
        let mut entries = self.entries.write().await;
        let next_id = match entries.keys().next_back() {
            None => 1,
            Some(last) => last.checked_add(1).ok_or_else(|| {
                HotelError::Storage(format!("room id space exhausted after {last}"))
            })?,
        };
        room.id = next_id;
        entries.insert(next_id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<RoomRecord>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<RoomRecord>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn update(&self, room: &RoomRecord) -> Result<()> {
        let mut entries = self.entries.write().await;
        let slot = entries.get_mut(&room.id).ok_or(HotelError::NotFound {
            entity: "Room",
            id: room.id,
        })?;
        *slot = room.clone();
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(HotelError::NotFound { entity: "Room", id })
    }

    async fn find_by_category(&self, category: RoomCategory) -> Result<Vec<RoomRecord>> {
        Ok(self.filtered(|r| r.category == category).await)
    }

    async fn find_available(&self) -> Result<Vec<RoomRecord>> {
        Ok(self.filtered(|r| r.available).await)
    }

    async fn find_by_hotel_id(&self, hotel_id: u32) -> Result<Vec<RoomRecord>> {
        Ok(self.filtered(|r| r.hotel_id == hotel_id).await)
    }
}
