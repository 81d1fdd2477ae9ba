use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::adapters::memory::pricing_store::InMemoryPricingStore;
use crate::adapters::memory::reservations::InMemoryReservations;
use crate::adapters::memory::rooms::InMemoryRooms;
use crate::domain::pricing::PricingTables;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::room::{RoomCategory, RoomRecord};
use crate::error::{HotelError, Result};
use crate::ports::reservation_repository::ReservationRepository;
use crate::service::BookingService;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn make_room(id: u32, category: RoomCategory) -> RoomRecord {
    RoomRecord {
        id,
        category,
        available: true,
        hotel_id: 1,
    }
}

pub fn make_reservation(id: u32, room_id: u32, start: NaiveDate, end: NaiveDate) -> Reservation {
    Reservation {
        id,
        customer_id: 1,
        room_id,
        start_date: start,
        end_date: end,
        status: ReservationStatus::Confirmed,
        total_price: 0.0,
    }
}

/// Single 100, Double 150, Suite 250; no seasonal or event data.
pub fn make_pricing_tables() -> PricingTables {
    let mut tables = PricingTables::default();
    tables.update_base_price(RoomCategory::Single, 100.0).unwrap();
    tables.update_base_price(RoomCategory::Double, 150.0).unwrap();
    tables.update_base_price(RoomCategory::Suite, 250.0).unwrap();
    tables
}

/// Service over in-memory stores with the given rooms and reservations.
pub fn make_service(rooms: Vec<RoomRecord>, reservations: Vec<Reservation>) -> BookingService {
    BookingService::new(
        Arc::new(InMemoryPricingStore::new(make_pricing_tables())),
        Arc::new(InMemoryRooms::with_rooms(rooms)),
        Arc::new(InMemoryReservations::with_reservations(reservations)),
    )
}

/// Reservation repository whose every call fails with a storage error.
pub struct FailingReservations;

fn storage_down<T>() -> Result<T> {
    Err(HotelError::Storage("reservation store unavailable".into()))
}

#[async_trait]
impl ReservationRepository for FailingReservations {
    async fn create(&self, _reservation: Reservation) -> Result<Reservation> {
        storage_down()
    }
    async fn find_by_id(&self, _id: u32) -> Result<Option<Reservation>> {
        storage_down()
    }
    async fn find_all(&self) -> Result<Vec<Reservation>> {
        storage_down()
    }
    async fn update(&self, _reservation: &Reservation) -> Result<()> {
        storage_down()
    }
    async fn delete(&self, _id: u32) -> Result<()> {
        storage_down()
    }
    async fn find_by_date_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        storage_down()
    }
    async fn find_by_status(&self, _status: ReservationStatus) -> Result<Vec<Reservation>> {
        storage_down()
    }
    async fn find_by_room_id(&self, _room_id: u32) -> Result<Vec<Reservation>> {
        storage_down()
    }
    async fn find_by_customer_id(&self, _customer_id: u32) -> Result<Vec<Reservation>> {
        storage_down()
    }
}

/// In-memory reservations that yield to the scheduler before each snapshot
/// and write, so concurrent bookings interleave at the worst points.
#[derive(Default)]
pub struct YieldingReservations {
    inner: InMemoryReservations,
}

#[async_trait]
impl ReservationRepository for YieldingReservations {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        tokio::task::yield_now().await;
        self.inner.create(reservation).await
    }
    async fn find_by_id(&self, id: u32) -> Result<Option<Reservation>> {
        self.inner.find_by_id(id).await
    }
    async fn find_all(&self) -> Result<Vec<Reservation>> {
        tokio::task::yield_now().await;
        self.inner.find_all().await
    }
    async fn update(&self, reservation: &Reservation) -> Result<()> {
        tokio::task::yield_now().await;
        self.inner.update(reservation).await
    }
    async fn delete(&self, id: u32) -> Result<()> {
        self.inner.delete(id).await
    }
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        self.inner.find_by_date_range(start, end).await
    }
    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        self.inner.find_by_status(status).await
    }
    async fn find_by_room_id(&self, room_id: u32) -> Result<Vec<Reservation>> {
        self.inner.find_by_room_id(room_id).await
    }
    async fn find_by_customer_id(&self, customer_id: u32) -> Result<Vec<Reservation>> {
        self.inner.find_by_customer_id(customer_id).await
    }
}
