use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::error::Result;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store a new reservation, assigning its id. Returns the stored record.
    async fn create(&self, reservation: Reservation) -> Result<Reservation>;
    async fn find_by_id(&self, id: u32) -> Result<Option<Reservation>>;
    async fn find_all(&self) -> Result<Vec<Reservation>>;
    async fn update(&self, reservation: &Reservation) -> Result<()>;
    async fn delete(&self, id: u32) -> Result<()>;

    /// Reservations lying wholly inside `[start, end]`.
    async fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate)
    -> Result<Vec<Reservation>>;
    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>>;
    async fn find_by_room_id(&self, room_id: u32) -> Result<Vec<Reservation>>;
    async fn find_by_customer_id(&self, customer_id: u32) -> Result<Vec<Reservation>>;
}
