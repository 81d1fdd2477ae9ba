use async_trait::async_trait;

use crate::domain::room::{RoomCategory, RoomRecord};
use crate::error::Result;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Store a new room, assigning its id. Returns the stored record.
    async fn create(&self, room: RoomRecord) -> Result<RoomRecord>;
    async fn find_by_id(&self, id: u32) -> Result<Option<RoomRecord>>;
    async fn find_all(&self) -> Result<Vec<RoomRecord>>;
    async fn update(&self, room: &RoomRecord) -> Result<()>;
    async fn delete(&self, id: u32) -> Result<()>;

    async fn find_by_category(&self, category: RoomCategory) -> Result<Vec<RoomRecord>>;
    async fn find_available(&self) -> Result<Vec<RoomRecord>>;
    async fn find_by_hotel_id(&self, hotel_id: u32) -> Result<Vec<RoomRecord>>;
}
