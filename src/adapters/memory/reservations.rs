use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::error::{HotelError, Result};
use crate::ports::reservation_repository::ReservationRepository;

#[derive(Debug, Default)]
pub struct InMemoryReservations {
    entries: RwLock<BTreeMap<u32, Reservation>>,
}

impl InMemoryReservations {
    /// Seed with existing reservations, keeping their ids.
    pub fn with_reservations(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let entries = reservations.into_iter().map(|r| (r.id, r)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    async fn filtered(&self, predicate: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
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
impl ReservationRepository for InMemoryReservations {
    async fn create(&self, mut reservation: Reservation) -> Result<Reservation> {
        let mut entries = self.entries.write().await;
        let next_id = match entries.keys().next_back() {
            None => 1,
            Some(last) => last.checked_add(1).ok_or_else(|| {
                HotelError::Storage(format!("reservation id space exhausted after {last}"))
            })?,
        };
        reservation.id = next_id;
        entries.insert(next_id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Reservation>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn update(&self, reservation: &Reservation) -> Result<()> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .get_mut(&reservation.id)
            .ok_or(HotelError::NotFound {
                entity: "Reservation",
                id: reservation.id,
            })?;
        *slot = reservation.clone();
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(HotelError::NotFound {
                entity: "Reservation",
                id,
            })
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        Ok(self
            .filtered(|r| r.start_date >= start && r.end_date <= end)
            .await)
    }

    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        Ok(self.filtered(|r| r.status == status).await)
    }

    async fn find_by_room_id(&self, room_id: u32) -> Result<Vec<Reservation>> {
        Ok(self.filtered(|r| r.room_id == room_id).await)
    }

    async fn find_by_customer_id(&self, customer_id: u32) -> Result<Vec<Reservation>> {
        Ok(self.filtered(|r| r.customer_id == customer_id).await)
    }
}
