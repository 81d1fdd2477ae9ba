use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_window::DateWindow;
use crate::error::HotelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(HotelError::validation(format!(
                "unknown reservation status '{other}'"
            ))),
        }
    }
}

/// A booked span of nights for one room.
///
/// `end_date` is the checkout day: it bounds night counting exclusively,
/// but overlap tests against a query window treat it inclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u32,
    pub customer_id: u32,
    pub room_id: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    #[serde(default)]
    pub total_price: f64,
}

impl Reservation {
    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }

    /// Number of nights booked, `end_date - start_date`.
    pub fn nights(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// `end >= window.start && start <= window.end`.
    pub fn overlaps(&self, window: &DateWindow) -> bool {
        !window.is_empty() && self.end_date >= window.start && self.start_date <= window.end
    }

    /// Inclusive day count of the span clipped to `window`, 0 when disjoint.
    pub fn clipped_days(&self, window: &DateWindow) -> u32 {
        if !self.overlaps(window) {
            return 0;
        }
        let start = self.start_date.max(window.start);
        let end = self.end_date.min(window.end);
        u32::try_from((end - start).num_days() + 1).unwrap_or(0)
    }

    /// Nights of this stay (checkout day excluded) that fall inside `window`.
    pub fn nights_within(&self, window: &DateWindow) -> impl Iterator<Item = NaiveDate> + use<> {
        let first = self.start_date.max(window.start);
        let end_date = self.end_date;
        let window_end = window.end;
        first
            .iter_days()
            .take_while(move |d| *d < end_date && *d <= window_end)
    }

    /// Mark as cancelled. The stored total is left untouched.
    pub fn cancel(&mut self) {
        self.status = ReservationStatus::Cancelled;
    }
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reservation #{} [{}] room {} for customer {}: {} to {} ({} nights), ${:.2}",
            self.id,
            self.status,
            self.room_id,
            self.customer_id,
            self.start_date,
            self.end_date,
            self.nights(),
            self.total_price,
        )
    }
}
