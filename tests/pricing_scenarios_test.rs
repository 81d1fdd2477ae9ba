//! Worked pricing and statistics examples, checked through the public API.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use hotel_pricing::domain::date_window::DateWindow;
use hotel_pricing::domain::price_calculator::PriceCalculator;
use hotel_pricing::domain::pricing::PricingTables;
use hotel_pricing::domain::reservation::{Reservation, ReservationStatus};
use hotel_pricing::domain::room::{RoomCategory, RoomRecord};
use hotel_pricing::domain::statistics::{self, StatisticsAggregator};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn single_at_100() -> PricingTables {
    let mut tables = PricingTables::default();
    tables.update_base_price(RoomCategory::Single, 100.0).unwrap();
    tables
}

fn reservation(id: u32, start: NaiveDate, end: NaiveDate, status: ReservationStatus) -> Reservation {
    Reservation {
        id,
        customer_id: 1,
        room_id: 1,
        start_date: start,
        end_date: end,
        status,
        total_price: 0.0,
    }
}

fn one_single_room() -> Vec<RoomRecord> {
    vec![RoomRecord {
        id: 1,
        category: RoomCategory::Single,
        available: true,
        hotel_id: 1,
    }]
}

#[test]
fn weekday_stay_without_discount() {
    let tables = single_at_100();
    let calc = PriceCalculator::new(&tables);
    // Monday to Wednesday: two weekday nights
    let total = calc
        .stay_price(d(2024, 6, 3), d(2024, 6, 5), RoomCategory::Single, 0.6)
        .unwrap();
    assert!((total - 200.0).abs() < 1e-9);
}

#[test]
fn saturday_night_carries_weekend_surcharge() {
    let tables = single_at_100();
    let calc = PriceCalculator::new(&tables);
    let nightly = calc.nightly_price(d(2024, 6, 8), RoomCategory::Single, 0.6);
    assert!((nightly - 150.0).abs() < 1e-9);
    let total = calc
        .stay_price(d(2024, 6, 8), d(2024, 6, 9), RoomCategory::Single, 0.6)
        .unwrap();
    assert!((total - 150.0).abs() < 1e-9);
}

#[test]
fn event_dominates_season_on_new_years_eve() {
    let mut tables = single_at_100();
    tables
        .set_seasonal_multiplier(d(2024, 12, 20), d(2024, 12, 31), 2.0)
        .unwrap();
    tables.set_event_pricing(d(2024, 12, 31), "NewYear", 3.0).unwrap();

    let calc = PriceCalculator::new(&tables);
    let nightly = calc.nightly_price(d(2024, 12, 31), RoomCategory::Single, 0.6);
    assert!((nightly - 300.0).abs() < 1e-9);
    // The day before only has the season
    let nightly = calc.nightly_price(d(2024, 12, 30), RoomCategory::Single, 0.6);
    assert!((nightly - 200.0).abs() < 1e-9);
}

#[test]
fn partial_overlap_is_clipped_to_window() {
    let rooms = one_single_room();
    let reservations = vec![reservation(
        1,
        d(2024, 6, 5),
        d(2024, 6, 20),
        ReservationStatus::Confirmed,
    )];
    let window = DateWindow::new(d(2024, 6, 1), d(2024, 6, 10));

    assert_eq!(window.len_days(), 10);
    assert_eq!(reservations[0].clipped_days(&window), 6);
    assert_eq!(statistics::occupied_room_days(&reservations, &window), 6);
    assert!((statistics::occupancy_rate(&rooms, &reservations, &window) - 0.6).abs() < 1e-9);
}

#[test]
fn cancelled_reservation_counts_on_any_overlap() {
    let reservations = vec![reservation(
        1,
        d(2024, 3, 1),
        d(2024, 3, 5),
        ReservationStatus::Cancelled,
    )];
    let window = DateWindow::new(d(2024, 3, 4), d(2024, 3, 10));
    assert_eq!(statistics::cancellation_count(&reservations, &window), 1);
}

#[test]
fn revenue_counts_only_nights_inside_window() {
    let tables = single_at_100();
    let rooms = one_single_room();
    // Mon 06-03 to Fri 06-07; window stops after Tuesday's night
    let reservations = vec![reservation(
        1,
        d(2024, 6, 3),
        d(2024, 6, 7),
        ReservationStatus::Confirmed,
    )];
    let window = DateWindow::new(d(2024, 6, 3), d(2024, 6, 4));
    let stats = StatisticsAggregator::new(&rooms, &reservations, PriceCalculator::new(&tables));

    // Fully occupied window, no discount
    assert!((stats.occupancy_rate(&window) - 1.0).abs() < 1e-9);
    assert!((stats.revenue(&window).unwrap() - 200.0).abs() < 1e-9);
}

#[test]
fn empty_hotel_reports_zero_occupancy() {
    let window = DateWindow::new(d(2024, 6, 1), d(2024, 6, 10));
    assert!(statistics::occupancy_rate(&[], &[], &window).abs() < f64::EPSILON);
    let reversed = DateWindow::new(d(2024, 6, 10), d(2024, 6, 1));
    assert!(statistics::occupancy_rate(&one_single_room(), &[], &reversed).abs() < f64::EPSILON);
}
