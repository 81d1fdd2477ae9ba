use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::config::types::ReportConfig;
use crate::domain::date_window::DateWindow;
use crate::domain::price_calculator::{PriceCalculator, StayQuote};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::room::{RoomCategory, RoomRecord};
use crate::domain::statistics::{
    self, CancellationReport, CustomRangeReport, OccupancyReport, RevenueReport,
    RoomTypePerformanceReport, StatisticsAggregator,
};
use crate::error::{HotelError, Result};
use crate::ports::pricing_store::PricingStore;
use crate::ports::reservation_repository::ReservationRepository;
use crate::ports::room_repository::RoomRepository;

/// Booking workflow and report assembly over the three storage ports.
///
/// Every report runs against a fresh snapshot of rooms, reservations and
/// pricing tables taken at call time. Reservation changes are serialized,
/// so the conflict check and the write that follows it cannot interleave
/// with another booking.
pub struct BookingService {
    pricing: Arc<dyn PricingStore>,
    rooms: Arc<dyn RoomRepository>,
    reservations: Arc<dyn ReservationRepository>,
    reports: ReportConfig,
    bookings: Mutex<()>,
}

impl BookingService {
    pub fn new(
        pricing: Arc<dyn PricingStore>,
        rooms: Arc<dyn RoomRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            pricing,
            rooms,
            reservations,
            reports: ReportConfig::default(),
            bookings: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_report_config(mut self, reports: ReportConfig) -> Self {
        self.reports = reports;
        self
    }

    pub fn pricing(&self) -> &dyn PricingStore {
        self.pricing.as_ref()
    }

    // -----------------------------------------------------------------------
    // Pricing
    // -----------------------------------------------------------------------

    /// Quote a stay. Without an explicit rate, the discount follows the
    /// current occupancy over the stay's nights.
    pub async fn quote_stay(
        &self,
        category: RoomCategory,
        check_in: NaiveDate,
        check_out: NaiveDate,
        occupancy_rate: Option<f64>,
    ) -> Result<StayQuote> {
        let window = DateWindow::for_stay(check_in, check_out)?;
        let occupancy = match occupancy_rate {
            Some(rate) if !(0.0..=1.0).contains(&rate) => {
                return Err(HotelError::validation(format!(
                    "occupancy rate must be between 0 and 1, got {rate}"
                )));
            }
            Some(rate) => rate,
            None => {
                let rooms = self.rooms.find_all().await?;
                let reservations = self.reservations.find_all().await?;
                statistics::occupancy_rate(&rooms, &reservations, &window)
            }
        };
        let tables = self.pricing.snapshot()?;
        PriceCalculator::new(&tables).quote(check_in, check_out, category, occupancy)
    }

    // -----------------------------------------------------------------------
    // Reservations
    // -----------------------------------------------------------------------

    pub async fn create_reservation(
        &self,
        customer_id: u32,
        room_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        let window = DateWindow::for_stay(check_in, check_out)?;
        let _guard = self.bookings.lock().await;
        let room = self.room(room_id).await?;
        if !room.available {
            return Err(HotelError::validation(format!(
                "room {room_id} is not available for booking"
            )));
        }

        let existing = self.reservations.find_all().await?;
        ensure_no_conflict(&existing, None, room_id, check_in, check_out)?;
        let total_price = self
            .price_stay(&existing, &room, check_in, check_out, &window)
            .await?;

        let reservation = self
            .reservations
            .create(Reservation {
                id: 0,
                customer_id,
                room_id,
                start_date: check_in,
                end_date: check_out,
                status: ReservationStatus::Confirmed,
                total_price,
            })
            .await?;
        tracing::info!(
            id = reservation.id,
            room_id,
            customer_id,
            total = total_price,
            "Created reservation {check_in} to {check_out}"
        );
        Ok(reservation)
    }

    /// Mark a reservation cancelled. Cancelling twice is a no-op.
    pub async fn cancel_reservation(&self, id: u32) -> Result<Reservation> {
        let _guard = self.bookings.lock().await;
        let mut reservation = self.reservation(id).await?;
        if reservation.is_cancelled() {
            tracing::debug!(id, "Reservation already cancelled");
            return Ok(reservation);
        }
        reservation.cancel();
        self.reservations.update(&reservation).await?;
        tracing::info!(id, "Cancelled reservation");
        Ok(reservation)
    }

    /// Move a confirmed reservation to new dates and re-price it.
    pub async fn reschedule_reservation(
        &self,
        id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        let window = DateWindow::for_stay(check_in, check_out)?;
        let _guard = self.bookings.lock().await;
        let mut reservation = self.reservation(id).await?;
        if reservation.is_cancelled() {
            return Err(HotelError::validation(format!(
                "reservation {id} is cancelled and cannot be rescheduled"
            )));
        }
        let room = self
            .rooms
            .find_by_id(reservation.room_id)
            .await?
            .ok_or(HotelError::DataIntegrity {
                reservation_id: id,
                room_id: reservation.room_id,
            })?;

        let others: Vec<Reservation> = self
            .reservations
            .find_all()
            .await?
            .into_iter()
            .filter(|r| r.id != id)
            .collect();
        ensure_no_conflict(&others, Some(id), room.id, check_in, check_out)?;

        reservation.total_price = self
            .price_stay(&others, &room, check_in, check_out, &window)
            .await?;
        reservation.start_date = check_in;
        reservation.end_date = check_out;
        self.reservations.update(&reservation).await?;
        tracing::info!(
            id,
            total = reservation.total_price,
            "Rescheduled reservation to {check_in} to {check_out}"
        );
        Ok(reservation)
    }

    async fn price_stay(
        &self,
        existing: &[Reservation],
        room: &RoomRecord,
        check_in: NaiveDate,
        check_out: NaiveDate,
        window: &DateWindow,
    ) -> Result<f64> {
        let rooms = self.rooms.find_all().await?;
        let occupancy = statistics::occupancy_rate(&rooms, existing, window);
        let tables = self.pricing.snapshot()?;
        PriceCalculator::new(&tables).stay_price(check_in, check_out, room.category, occupancy)
    }

    async fn room(&self, id: u32) -> Result<RoomRecord> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or(HotelError::NotFound { entity: "Room", id })
    }

    pub async fn reservation(&self, id: u32) -> Result<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(HotelError::NotFound {
                entity: "Reservation",
                id,
            })
    }

    pub async fn reservations(&self) -> Result<Vec<Reservation>> {
        self.reservations.find_all().await
    }

    pub async fn reservations_by_customer(&self, customer_id: u32) -> Result<Vec<Reservation>> {
        self.reservations.find_by_customer_id(customer_id).await
    }

    pub async fn reservations_by_room(&self, room_id: u32) -> Result<Vec<Reservation>> {
        self.reservations.find_by_room_id(room_id).await
    }

    pub async fn reservations_by_status(
        &self,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>> {
        self.reservations.find_by_status(status).await
    }

    /// Reservations lying wholly inside `window`.
    pub async fn reservations_within(&self, window: &DateWindow) -> Result<Vec<Reservation>> {
        self.reservations
            .find_by_date_range(window.start, window.end)
            .await
    }

    // -----------------------------------------------------------------------
    // Reports
    // -----------------------------------------------------------------------

    async fn with_statistics<T>(
        &self,
        build: impl FnOnce(&StatisticsAggregator<'_>) -> Result<T>,
    ) -> Result<T> {
        let rooms = self.rooms.find_all().await?;
        let reservations = self.reservations.find_all().await?;
        let tables = self.pricing.snapshot()?;
        let aggregator =
            StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables))
                .with_dangling_policy(self.reports.on_dangling_room);
        build(&aggregator)
    }

    pub async fn occupancy_report(&self, window: &DateWindow) -> Result<OccupancyReport> {
        self.with_statistics(|stats| stats.occupancy_report(window))
            .await
    }

    pub async fn revenue_report(&self, window: &DateWindow) -> Result<RevenueReport> {
        self.with_statistics(|stats| stats.revenue_report(window))
            .await
    }

    /// Cancellations in `window`, or in the configured lookback period
    /// ending on `as_of` when no window is given.
    pub async fn cancellation_report(
        &self,
        window: Option<DateWindow>,
        as_of: NaiveDate,
    ) -> Result<CancellationReport> {
        let window = window.unwrap_or_else(|| {
            DateWindow::trailing(as_of, self.reports.cancellation_lookback_days)
        });
        self.with_statistics(|stats| stats.cancellation_report(&window))
            .await
    }

    pub async fn room_type_performance_report(
        &self,
        window: &DateWindow,
    ) -> Result<RoomTypePerformanceReport> {
        self.with_statistics(|stats| stats.room_type_performance_report(window))
            .await
    }

    pub async fn custom_range_report(&self, window: &DateWindow) -> Result<CustomRangeReport> {
        self.with_statistics(|stats| stats.custom_range_report(window))
            .await
    }
}

/// Reject a stay whose nights collide with another confirmed booking of the room.
fn ensure_no_conflict(
    reservations: &[Reservation],
    exclude: Option<u32>,
    room_id: u32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<()> {
    let clash = reservations.iter().find(|r| {
        Some(r.id) != exclude
            && r.room_id == room_id
            && r.is_confirmed()
            && r.start_date < check_out
            && check_in < r.end_date
    });
    match clash {
        Some(r) => Err(HotelError::validation(format!(
            "room {room_id} is already booked from {} to {} (reservation {})",
            r.start_date, r.end_date, r.id
        ))),
        None => Ok(()),
    }
}
