#![allow(clippy::cast_precision_loss)] // Room-day counts are small enough for f64

use serde::{Deserialize, Serialize};

use super::date_window::DateWindow;
use super::price_calculator::PriceCalculator;
use super::reservation::Reservation;
use super::room::{RoomCategory, RoomRecord};
use crate::error::{HotelError, Result};

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// What to do with a reservation whose room is missing from the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingRoomPolicy {
    /// Log and leave the reservation out of per-category figures.
    #[default]
    Skip,
    /// Fail the whole computation with a data-integrity error.
    Abort,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Room-days occupied by confirmed reservations, clipped to `window`.
pub fn occupied_room_days<'a>(
    reservations: impl IntoIterator<Item = &'a Reservation>,
    window: &DateWindow,
) -> u64 {
    reservations
        .into_iter()
        .filter(|r| r.is_confirmed())
        .map(|r| u64::from(r.clipped_days(window)))
        .sum()
}

/// `occupied / (room_count × window_days)`, 0.0 when there is nothing to divide by.
pub fn occupancy_rate(rooms: &[RoomRecord], reservations: &[Reservation], window: &DateWindow) -> f64 {
    let available = rooms.len() as u64 * u64::from(window.len_days());
    ratio(occupied_room_days(reservations, window), available)
}

/// Cancelled reservations whose span touches `window`.
pub fn cancellation_count(reservations: &[Reservation], window: &DateWindow) -> u32 {
    let count = reservations
        .iter()
        .filter(|r| r.is_cancelled() && r.overlaps(window))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Occupancy, revenue and cancellation figures over a snapshot of rooms
/// and reservations.
///
/// Revenue is re-derived night by night from the current pricing rules,
/// not taken from each reservation's stored total. Every night in a window
/// is priced at that window's overall occupancy rate.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAggregator<'a> {
    rooms: &'a [RoomRecord],
    reservations: &'a [Reservation],
    calculator: PriceCalculator<'a>,
    on_dangling: DanglingRoomPolicy,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(
        rooms: &'a [RoomRecord],
        reservations: &'a [Reservation],
        calculator: PriceCalculator<'a>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            calculator,
            on_dangling: DanglingRoomPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_dangling_policy(mut self, policy: DanglingRoomPolicy) -> Self {
        self.on_dangling = policy;
        self
    }

    /// Category of the reservation's room, or a data-integrity fault.
    pub fn resolve_category(&self, reservation: &Reservation) -> Result<RoomCategory> {
        self.rooms
            .iter()
            .find(|room| room.id == reservation.room_id)
            .map(|room| room.category)
            .ok_or(HotelError::DataIntegrity {
                reservation_id: reservation.id,
                room_id: reservation.room_id,
            })
    }

    /// Resolve under the configured policy; `None` means skipped.
    fn category_of(&self, reservation: &Reservation) -> Result<Option<RoomCategory>> {
        match self.resolve_category(reservation) {
            Ok(category) => Ok(Some(category)),
            Err(err) => match self.on_dangling {
                DanglingRoomPolicy::Skip => {
                    tracing::debug!("Skipping reservation: {err}");
                    Ok(None)
                }
                DanglingRoomPolicy::Abort => Err(err),
            },
        }
    }

    /// Ids of reservations touching `window` whose room is not in the snapshot.
    pub fn dangling_in(&self, window: &DateWindow) -> Vec<u32> {
        self.reservations
            .iter()
            .filter(|r| r.overlaps(window) && self.resolve_category(r).is_err())
            .map(|r| r.id)
            .collect()
    }

    /// One warning per report for reservations left out under `Skip`.
    fn warn_skipped(&self, report: &str, window: &DateWindow) {
        if self.on_dangling != DanglingRoomPolicy::Skip {
            return;
        }
        let skipped = self.dangling_in(window);
        if !skipped.is_empty() {
            tracing::warn!(
                ?skipped,
                "{report} report for {window} leaves out reservations with unknown rooms"
            );
        }
    }

    fn confirmed_in(&self, window: &DateWindow) -> impl Iterator<Item = &'a Reservation> + use<'a> {
        let window = *window;
        self.reservations
            .iter()
            .filter(move |r| r.is_confirmed() && r.overlaps(&window))
    }

    fn rooms_of(&self, category: RoomCategory) -> u64 {
        self.rooms.iter().filter(|r| r.category == category).count() as u64
    }

    pub fn occupancy_rate(&self, window: &DateWindow) -> f64 {
        occupancy_rate(self.rooms, self.reservations, window)
    }

    pub fn cancellation_count(&self, window: &DateWindow) -> u32 {
        cancellation_count(self.reservations, window)
    }

    fn reservation_revenue(
        &self,
        reservation: &Reservation,
        category: RoomCategory,
        window: &DateWindow,
        occupancy: f64,
    ) -> f64 {
        reservation
            .nights_within(window)
            .map(|night| self.calculator.nightly_price(night, category, occupancy))
            .sum()
    }

    pub fn revenue(&self, window: &DateWindow) -> Result<f64> {
        let occupancy = self.occupancy_rate(window);
        let mut total = 0.0;
        for reservation in self.confirmed_in(window) {
            if let Some(category) = self.category_of(reservation)? {
                total += self.reservation_revenue(reservation, category, window, occupancy);
            }
        }
        tracing::debug!(%window, total, "computed revenue");
        Ok(total)
    }

    fn occupied_days_by_category(&self, category: RoomCategory, window: &DateWindow) -> Result<u64> {
        let mut occupied = 0;
        for reservation in self.confirmed_in(window) {
            if self.category_of(reservation)? == Some(category) {
                occupied += u64::from(reservation.clipped_days(window));
            }
        }
        Ok(occupied)
    }

    pub fn occupancy_by_category(&self, category: RoomCategory, window: &DateWindow) -> Result<f64> {
        let occupied = self.occupied_days_by_category(category, window)?;
        let available = self.rooms_of(category) * u64::from(window.len_days());
        Ok(ratio(occupied, available))
    }

    pub fn revenue_by_category(&self, category: RoomCategory, window: &DateWindow) -> Result<f64> {
        let occupancy = self.occupancy_rate(window);
        let mut total = 0.0;
        for reservation in self.confirmed_in(window) {
            if self.category_of(reservation)? == Some(category) {
                total += self.reservation_revenue(reservation, category, window, occupancy);
            }
        }
        Ok(total)
    }

    pub fn cancellations_by_category(
        &self,
        category: RoomCategory,
        window: &DateWindow,
    ) -> Result<u32> {
        let mut count = 0;
        for reservation in self
            .reservations
            .iter()
            .filter(|r| r.is_cancelled() && r.overlaps(window))
        {
            if self.category_of(reservation)? == Some(category) {
                count += 1;
            }
        }
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Reports
    // -----------------------------------------------------------------------

    pub fn occupancy_report(&self, window: &DateWindow) -> Result<OccupancyReport> {
        self.warn_skipped("Occupancy", window);
        let days = u64::from(window.len_days());
        let mut by_category = Vec::with_capacity(RoomCategory::ALL.len());
        for category in RoomCategory::ALL {
            let rooms = self.rooms_of(category);
            let occupied = self.occupied_days_by_category(category, window)?;
            by_category.push(CategoryOccupancy {
                category,
                rooms,
                occupied_room_days: occupied,
                available_room_days: rooms * days,
                occupancy_rate: ratio(occupied, rooms * days),
            });
        }
        Ok(OccupancyReport {
            window: *window,
            occupied_room_days: occupied_room_days(self.reservations, window),
            available_room_days: self.rooms.len() as u64 * days,
            occupancy_rate: self.occupancy_rate(window),
            by_category,
        })
    }

    pub fn revenue_report(&self, window: &DateWindow) -> Result<RevenueReport> {
        self.warn_skipped("Revenue", window);
        let mut by_category = Vec::with_capacity(RoomCategory::ALL.len());
        for category in RoomCategory::ALL {
            by_category.push((category, self.revenue_by_category(category, window)?));
        }
        Ok(RevenueReport {
            window: *window,
            total_revenue: self.revenue(window)?,
            by_category,
        })
    }

    pub fn cancellation_report(&self, window: &DateWindow) -> Result<CancellationReport> {
        self.warn_skipped("Cancellation", window);
        let mut by_category = Vec::with_capacity(RoomCategory::ALL.len());
        for category in RoomCategory::ALL {
            by_category.push((category, self.cancellations_by_category(category, window)?));
        }
        Ok(CancellationReport {
            window: *window,
            total_cancellations: self.cancellation_count(window),
            by_category,
        })
    }

    pub fn room_type_performance_report(
        &self,
        window: &DateWindow,
    ) -> Result<RoomTypePerformanceReport> {
        self.warn_skipped("Room type performance", window);
        let mut rows = Vec::with_capacity(RoomCategory::ALL.len());
        for category in RoomCategory::ALL {
            rows.push(CategoryPerformance {
                category,
                occupancy_rate: self.occupancy_by_category(category, window)?,
                revenue: self.revenue_by_category(category, window)?,
            });
        }
        Ok(RoomTypePerformanceReport {
            window: *window,
            rows,
        })
    }

    pub fn custom_range_report(&self, window: &DateWindow) -> Result<CustomRangeReport> {
        self.warn_skipped("Custom range", window);
        Ok(CustomRangeReport {
            window: *window,
            occupancy_rate: self.occupancy_rate(window),
            revenue: self.revenue(window)?,
            cancellations: self.cancellation_count(window),
        })
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOccupancy {
    pub category: RoomCategory,
    pub rooms: u64,
    pub occupied_room_days: u64,
    pub available_room_days: u64,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub window: DateWindow,
    pub occupied_room_days: u64,
    pub available_room_days: u64,
    pub occupancy_rate: f64,
    pub by_category: Vec<CategoryOccupancy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    pub window: DateWindow,
    pub total_revenue: f64,
    pub by_category: Vec<(RoomCategory, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationReport {
    pub window: DateWindow,
    pub total_cancellations: u32,
    pub by_category: Vec<(RoomCategory, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category: RoomCategory,
    pub occupancy_rate: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypePerformanceReport {
    pub window: DateWindow,
    pub rows: Vec<CategoryPerformance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRangeReport {
    pub window: DateWindow,
    pub occupancy_rate: f64,
    pub revenue: f64,
    pub cancellations: u32,
}

// ---------------------------------------------------------------------------
// Display impls
// ---------------------------------------------------------------------------

impl std::fmt::Display for OccupancyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Occupancy Report:")?;
        writeln!(f, "Period: {}", self.window)?;
        writeln!(
            f,
            "Occupancy Rate: {:.2}% ({}/{} room-days)",
            self.occupancy_rate * 100.0,
            self.occupied_room_days,
            self.available_room_days
        )?;
        for row in &self.by_category {
            writeln!(
                f,
                "{} Rooms: {:.2}% ({}/{} room-days, {} rooms)",
                row.category,
                row.occupancy_rate * 100.0,
                row.occupied_room_days,
                row.available_room_days,
                row.rooms
            )?;
        }
        Ok(())
    }
}

impl std::fmt::Display for RevenueReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Revenue Report:")?;
        writeln!(f, "Period: {}", self.window)?;
        writeln!(f, "Total Revenue: ${:.2}", self.total_revenue)?;
        for (category, revenue) in &self.by_category {
            writeln!(f, "{category} Rooms Revenue: ${revenue:.2}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for CancellationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Cancellation Report:")?;
        writeln!(f, "Period: {}", self.window)?;
        writeln!(f, "Total Cancellations: {}", self.total_cancellations)?;
        for (category, count) in &self.by_category {
            writeln!(f, "{category} Room Cancellations: {count}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for RoomTypePerformanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Room Type Performance Report:")?;
        writeln!(f, "Period: {}", self.window)?;
        for row in &self.rows {
            writeln!(f, "{} Rooms:", row.category)?;
            writeln!(f, "  Occupancy: {:.2}%", row.occupancy_rate * 100.0)?;
            writeln!(f, "  Revenue: ${:.2}", row.revenue)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for CustomRangeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Custom Date Range Report ({})", self.window)?;
        writeln!(f, "Occupancy: {:.2}%", self.occupancy_rate * 100.0)?;
        writeln!(f, "Revenue: ${:.2}", self.revenue)?;
        writeln!(f, "Cancellations: {}", self.cancellations)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::pricing::PricingTables;
    use crate::domain::reservation::ReservationStatus;
    use crate::test_helpers::{d, make_pricing_tables, make_reservation, make_room};

    fn june() -> DateWindow {
        DateWindow::new(d(2024, 6, 1), d(2024, 6, 10))
    }

    #[test]
    fn occupancy_clips_partial_overlap() {
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20))];
        let rate = occupancy_rate(&rooms, &reservations, &june());
        assert!((rate - 0.6).abs() < 1e-9);
    }

    #[test]
    fn occupancy_ignores_cancelled() {
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let mut cancelled = make_reservation(1, 1, d(2024, 6, 1), d(2024, 6, 5));
        cancelled.cancel();
        let rate = occupancy_rate(&rooms, &[cancelled], &june());
        assert!(rate.abs() < f64::EPSILON);
    }

    #[test]
    fn occupancy_zero_rooms_is_zero() {
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20))];
        assert!(occupancy_rate(&[], &reservations, &june()).abs() < f64::EPSILON);
    }

    #[test]
    fn occupancy_empty_window_is_zero() {
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20))];
        let window = DateWindow::new(d(2024, 6, 10), d(2024, 6, 1));
        assert!(occupancy_rate(&rooms, &reservations, &window).abs() < f64::EPSILON);
    }

    #[test]
    fn cancellation_count_uses_overlap_only() {
        let mut r = make_reservation(1, 1, d(2024, 3, 1), d(2024, 3, 5));
        r.status = ReservationStatus::Cancelled;
        let window = DateWindow::new(d(2024, 3, 4), d(2024, 3, 10));
        assert_eq!(cancellation_count(&[r.clone()], &window), 1);
        let later = DateWindow::new(d(2024, 3, 6), d(2024, 3, 10));
        assert_eq!(cancellation_count(&[r], &later), 0);
    }

    #[test]
    fn revenue_prices_only_clipped_nights() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        // 2024-06-05 (Wed) .. 2024-06-20, window ends 06-10 (Mon).
        // Nights in window: 05 Wed, 06 Thu, 07 Fri, 08 Sat, 09 Sun, 10 Mon.
        let mut r = make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20));
        r.total_price = 9_999.0;
        let reservations = vec![r];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        // occupancy 0.6 -> no discount; 4 weekday nights + 2 weekend nights
        let revenue = agg.revenue(&june()).unwrap();
        assert!((revenue - (4.0 * 100.0 + 2.0 * 150.0)).abs() < 1e-9);
    }

    #[test]
    fn revenue_excludes_checkout_day() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Double), make_room(2, RoomCategory::Double)];
        // Mon 06-03 .. Wed 06-05: two nights
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 3), d(2024, 6, 5))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let window = DateWindow::new(d(2024, 6, 3), d(2024, 6, 5));
        // occupancy = 3 / 6 = 0.5 -> no discount
        let revenue = agg.revenue(&window).unwrap();
        assert!((revenue - 300.0).abs() < 1e-9);
    }

    #[test]
    fn revenue_applies_window_occupancy_discount() {
        let tables = make_pricing_tables();
        let rooms: Vec<_> = (1..=10).map(|id| make_room(id, RoomCategory::Single)).collect();
        // one Tuesday night in a ten-room hotel over a one-day window -> 10% occupancy
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 4), d(2024, 6, 5))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let window = DateWindow::new(d(2024, 6, 4), d(2024, 6, 4));
        let revenue = agg.revenue(&window).unwrap();
        assert!((revenue - 80.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_room_skipped_by_default() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![
            make_reservation(1, 1, d(2024, 6, 3), d(2024, 6, 4)),
            make_reservation(2, 42, d(2024, 6, 3), d(2024, 6, 4)),
        ];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let window = DateWindow::new(d(2024, 6, 3), d(2024, 6, 3));
        let revenue = agg.revenue(&window).unwrap();
        // occupancy counts both room-days (2/1) -> no discount, only room 1 priced
        assert!((revenue - 100.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_in_lists_each_unknown_room_reservation_once() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let mut cancelled = make_reservation(3, 43, d(2024, 6, 5), d(2024, 6, 6));
        cancelled.cancel();
        let reservations = vec![
            make_reservation(1, 1, d(2024, 6, 3), d(2024, 6, 4)),
            make_reservation(2, 42, d(2024, 6, 3), d(2024, 6, 4)),
            cancelled,
            make_reservation(4, 44, d(2024, 8, 1), d(2024, 8, 2)),
        ];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        assert_eq!(agg.dangling_in(&june()), vec![2, 3]);
        // 4/10 room-days occupied -> 10% off; only reservation 1 is priced
        let report = agg.room_type_performance_report(&june()).unwrap();
        assert!((report.rows[0].revenue - 90.0).abs() < 1e-9);
        assert!(report.rows.iter().skip(1).all(|row| row.revenue.abs() < f64::EPSILON));
    }

    #[test]
    fn dangling_room_aborts_when_configured() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![make_reservation(7, 42, d(2024, 6, 3), d(2024, 6, 4))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables))
            .with_dangling_policy(DanglingRoomPolicy::Abort);
        let err = agg.revenue(&june()).unwrap_err();
        assert!(matches!(
            err,
            HotelError::DataIntegrity {
                reservation_id: 7,
                room_id: 42
            }
        ));
        assert!(agg.occupancy_by_category(RoomCategory::Single, &june()).is_err());
    }

    #[test]
    fn resolve_category_reports_dangling_distinctly() {
        let tables = PricingTables::default();
        let rooms = vec![make_room(1, RoomCategory::Suite)];
        let reservations = vec![];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let ok = make_reservation(1, 1, d(2024, 6, 3), d(2024, 6, 4));
        assert_eq!(agg.resolve_category(&ok).unwrap(), RoomCategory::Suite);
        let dangling = make_reservation(2, 5, d(2024, 6, 3), d(2024, 6, 4));
        assert!(matches!(
            agg.resolve_category(&dangling),
            Err(HotelError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn category_breakdown_sums_to_total() {
        let tables = make_pricing_tables();
        let rooms = vec![
            make_room(1, RoomCategory::Single),
            make_room(2, RoomCategory::Double),
            make_room(3, RoomCategory::Suite),
        ];
        let reservations = vec![
            make_reservation(1, 1, d(2024, 5, 28), d(2024, 6, 3)),
            make_reservation(2, 2, d(2024, 6, 6), d(2024, 6, 9)),
            make_reservation(3, 3, d(2024, 6, 9), d(2024, 6, 15)),
        ];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let total = agg.revenue(&june()).unwrap();
        let summed: f64 = RoomCategory::ALL
            .iter()
            .map(|c| agg.revenue_by_category(*c, &june()).unwrap())
            .sum();
        assert!((total - summed).abs() < 1e-9);
    }

    #[test]
    fn occupancy_by_category_uses_category_room_count() {
        let tables = make_pricing_tables();
        let rooms = vec![
            make_room(1, RoomCategory::Single),
            make_room(2, RoomCategory::Single),
            make_room(3, RoomCategory::Suite),
        ];
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 1), d(2024, 6, 30))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let single = agg.occupancy_by_category(RoomCategory::Single, &june()).unwrap();
        assert!((single - 0.5).abs() < 1e-9);
        let suite = agg.occupancy_by_category(RoomCategory::Suite, &june()).unwrap();
        assert!(suite.abs() < f64::EPSILON);
        let double = agg.occupancy_by_category(RoomCategory::Double, &june()).unwrap();
        assert!(double.abs() < f64::EPSILON);
    }

    #[test]
    fn occupancy_report_text() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let report = agg.occupancy_report(&june()).unwrap();
        assert_eq!(
            report.to_string(),
            "Occupancy Report:\n\
             Period: 2024-06-01 to 2024-06-10\n\
             Occupancy Rate: 60.00% (6/10 room-days)\n\
             SINGLE Rooms: 60.00% (6/10 room-days, 1 rooms)\n\
             DOUBLE Rooms: 0.00% (0/0 room-days, 0 rooms)\n\
             SUITE Rooms: 0.00% (0/0 room-days, 0 rooms)\n"
        );
    }

    #[test]
    fn revenue_report_text() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let reservations = vec![make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20))];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let report = agg.revenue_report(&june()).unwrap();
        assert_eq!(
            report.to_string(),
            "Revenue Report:\n\
             Period: 2024-06-01 to 2024-06-10\n\
             Total Revenue: $700.00\n\
             SINGLE Rooms Revenue: $700.00\n\
             DOUBLE Rooms Revenue: $0.00\n\
             SUITE Rooms Revenue: $0.00\n"
        );
    }

    #[test]
    fn cancellation_report_breaks_down_by_category() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single), make_room(2, RoomCategory::Suite)];
        let mut a = make_reservation(1, 1, d(2024, 6, 2), d(2024, 6, 4));
        a.cancel();
        let mut b = make_reservation(2, 2, d(2024, 6, 8), d(2024, 6, 12));
        b.cancel();
        let mut c = make_reservation(3, 2, d(2024, 7, 8), d(2024, 7, 12));
        c.cancel();
        let reservations = vec![a, b, c];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));
        let report = agg.cancellation_report(&june()).unwrap();
        assert_eq!(report.total_cancellations, 2);
        assert_eq!(
            report.by_category,
            vec![
                (RoomCategory::Single, 1),
                (RoomCategory::Double, 0),
                (RoomCategory::Suite, 1)
            ]
        );
        assert!(report.to_string().contains("SUITE Room Cancellations: 1"));
    }

    #[test]
    fn performance_and_custom_reports() {
        let tables = make_pricing_tables();
        let rooms = vec![make_room(1, RoomCategory::Single)];
        let mut cancelled = make_reservation(2, 1, d(2024, 6, 1), d(2024, 6, 2));
        cancelled.cancel();
        let reservations = vec![
            make_reservation(1, 1, d(2024, 6, 5), d(2024, 6, 20)),
            cancelled,
        ];
        let agg = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));

        let perf = agg.room_type_performance_report(&june()).unwrap().to_string();
        assert!(perf.contains("SINGLE Rooms:\n  Occupancy: 60.00%\n  Revenue: $700.00"));
        assert!(perf.contains("SUITE Rooms:\n  Occupancy: 0.00%\n  Revenue: $0.00"));

        let custom = agg.custom_range_report(&june()).unwrap();
        assert_eq!(custom.cancellations, 1);
        assert_eq!(
            custom.to_string(),
            "Custom Date Range Report (2024-06-01 to 2024-06-10)\n\
             Occupancy: 60.00%\n\
             Revenue: $700.00\n\
             Cancellations: 1\n"
        );
    }
}
