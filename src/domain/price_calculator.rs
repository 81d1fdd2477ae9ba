use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::pricing::PricingTables;
use super::room::RoomCategory;
use crate::error::{HotelError, Result};

pub const WEEKEND_MULTIPLIER: f64 = 1.5;

/// Tiered discount, non-increasing as occupancy rises.
pub fn occupancy_discount(occupancy_rate: f64) -> f64 {
    if occupancy_rate < 0.3 {
        0.20
    } else if occupancy_rate < 0.5 {
        0.10
    } else {
        0.0
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Price of one room-night with the factors that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightlyRate {
    pub date: NaiveDate,
    pub base_price: f64,
    pub weekend: bool,
    pub seasonal_multiplier: f64,
    pub event_multiplier: f64,
    pub date_multiplier: f64,
    pub discount: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayQuote {
    pub category: RoomCategory,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub occupancy_rate: f64,
    pub nights: Vec<NightlyRate>,
    pub total: f64,
}

impl std::fmt::Display for StayQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Quote: {} room, {} to {} ({} nights)",
            self.category,
            self.check_in,
            self.check_out,
            self.nights.len()
        )?;
        writeln!(
            f,
            "Occupancy: {:.1}% (discount {:.0}%)",
            self.occupancy_rate * 100.0,
            occupancy_discount(self.occupancy_rate) * 100.0
        )?;
        writeln!(
            f,
            "{:<12} {:>8} {:>8} {:>10}",
            "Date", "Weekend", "Factor", "Price"
        )?;
        writeln!(f, "{}", "-".repeat(41))?;
        for night in &self.nights {
            let weekend = if night.weekend { "Yes" } else { "No" };
            writeln!(
                f,
                "{:<12} {:>8} {:>8} {:>10}",
                night.date.to_string(),
                weekend,
                format!("x{:.2}", night.date_multiplier),
                format!("${:.2}", night.price)
            )?;
        }
        writeln!(f, "Total: ${:.2}", self.total)
    }
}

/// Composes per-night prices from a snapshot of the pricing tables.
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator<'a> {
    tables: &'a PricingTables,
}

impl<'a> PriceCalculator<'a> {
    pub const fn new(tables: &'a PricingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a PricingTables {
        self.tables
    }

    pub fn nightly_rate(
        &self,
        date: NaiveDate,
        category: RoomCategory,
        occupancy_rate: f64,
    ) -> NightlyRate {
        let base_price = self.tables.base_price(category);
        let weekend = is_weekend(date);
        let date_multiplier = self.tables.date_multiplier_on(date);
        let discount = occupancy_discount(occupancy_rate);

        let mut price = base_price;
        if weekend {
            price *= WEEKEND_MULTIPLIER;
        }
        price *= date_multiplier;
        price *= 1.0 - discount;

        NightlyRate {
            date,
            base_price,
            weekend,
            seasonal_multiplier: self.tables.seasonal_multiplier_on(date),
            event_multiplier: self.tables.event_multiplier_on(date),
            date_multiplier,
            discount,
            price,
        }
    }

    pub fn nightly_price(&self, date: NaiveDate, category: RoomCategory, occupancy_rate: f64) -> f64 {
        self.nightly_rate(date, category, occupancy_rate).price
    }

    /// Sum of nightly prices over `[start, end)`.
    pub fn stay_price(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        category: RoomCategory,
        occupancy_rate: f64,
    ) -> Result<f64> {
        if end <= start {
            return Err(HotelError::InvalidRange { start, end });
        }
        Ok(start
            .iter_days()
            .take_while(|d| *d < end)
            .map(|d| self.nightly_price(d, category, occupancy_rate))
            .sum())
    }

    pub fn quote(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        category: RoomCategory,
        occupancy_rate: f64,
    ) -> Result<StayQuote> {
        if end <= start {
            return Err(HotelError::InvalidRange { start, end });
        }
        let nights: Vec<NightlyRate> = start
            .iter_days()
            .take_while(|d| *d < end)
            .map(|d| self.nightly_rate(d, category, occupancy_rate))
            .collect();
        let total = nights.iter().map(|n| n.price).sum();
        Ok(StayQuote {
            category,
            check_in: start,
            check_out: end,
            occupancy_rate,
            nights,
            total,
        })
    }
}
