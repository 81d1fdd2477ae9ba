use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::room::RoomCategory;
use crate::error::{HotelError, Result};

/// Multiplier applied on days with no seasonal or event entry.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Contiguous run of calendar days sharing one multiplier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeGroup {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DateRangeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Base prices per room category plus the day-indexed seasonal and event
/// multiplier tables.
///
/// Seasonal ranges are expanded into one entry per covered day, so a later
/// insert overwrites earlier values day by day. Event factors are kept per
/// name; lookups use the highest factor among a day's events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTables {
    base_prices: [Option<f64>; RoomCategory::ALL.len()],
    seasonal: BTreeMap<NaiveDate, f64>,
    events: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

fn validate_factor(what: &str, factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(HotelError::validation(format!(
            "{what} multiplier must be a positive number, got {factor}"
        )));
    }
    Ok(())
}

impl PricingTables {
    /// Stored base price, or 0.0 when the category was never priced.
    pub fn base_price(&self, category: RoomCategory) -> f64 {
        self.base_prices[category.index()].unwrap_or(0.0)
    }

    pub fn current_base_prices(&self) -> Vec<(RoomCategory, f64)> {
        RoomCategory::ALL
            .iter()
            .map(|&c| (c, self.base_price(c)))
            .collect()
    }

    pub fn update_base_price(&mut self, category: RoomCategory, new_price: f64) -> Result<()> {
        if !new_price.is_finite() || new_price < 0.0 {
            return Err(HotelError::validation(format!(
                "base price for {category} must be a non-negative number, got {new_price}"
            )));
        }
        self.base_prices[category.index()] = Some(new_price);
        Ok(())
    }

    /// Set `factor` on every day of `[start, end]`, overwriting prior values.
    pub fn set_seasonal_multiplier(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        factor: f64,
    ) -> Result<()> {
        if end < start {
            return Err(HotelError::InvalidRange { start, end });
        }
        validate_factor("seasonal", factor)?;
        for day in start.iter_days().take_while(|d| *d <= end) {
            self.seasonal.insert(day, factor);
        }
        Ok(())
    }

    pub fn set_event_pricing(&mut self, date: NaiveDate, name: &str, factor: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HotelError::validation("event name is required"));
        }
        validate_factor("event", factor)?;
        self.events
            .entry(date)
            .or_default()
            .insert(name.to_string(), factor);
        Ok(())
    }

    pub fn seasonal_multiplier_on(&self, date: NaiveDate) -> f64 {
        self.seasonal
            .get(&date)
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// Highest factor among the day's named events; events never stack.
    pub fn event_multiplier_on(&self, date: NaiveDate) -> f64 {
        self.events
            .get(&date)
            .and_then(|events| events.values().copied().reduce(f64::max))
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// Combined calendar factor for a day.
    ///
    /// With only one layer set this is that layer's factor, matching
    /// `seasonal × event` with the other layer neutral. When a day carries
    /// both a seasonal factor and events, the largest factor dominates.
    pub fn date_multiplier_on(&self, date: NaiveDate) -> f64 {
        let seasonal = self.seasonal.get(&date).copied();
        let event = self
            .events
            .get(&date)
            .and_then(|events| events.values().copied().reduce(f64::max));
        match (seasonal, event) {
            (Some(s), Some(e)) => s.max(e),
            (Some(factor), None) | (None, Some(factor)) => factor,
            (None, None) => NEUTRAL_MULTIPLIER,
        }
    }

    /// Compress the seasonal table into runs of consecutive days with the
    /// same factor, in chronological order.
    pub fn grouped_seasonal_ranges(&self) -> Vec<(DateRangeGroup, f64)> {
        let mut groups = Vec::new();
        let mut entries = self.seasonal.iter().map(|(d, f)| (*d, *f));
        let Some((first_day, first_factor)) = entries.next() else {
            return groups;
        };

        let mut start = first_day;
        let mut previous = first_day;
        let mut current = first_factor;
        for (day, factor) in entries {
            let consecutive = previous.succ_opt() == Some(day);
            if !consecutive || factor.to_bits() != current.to_bits() {
                groups.push((DateRangeGroup { start, end: previous }, current));
                start = day;
                current = factor;
            }
            previous = day;
        }
        groups.push((DateRangeGroup { start, end: previous }, current));
        groups
    }

    /// Event factors by day, chronologically; names sorted within a day.
    pub fn event_pricing_info(&self) -> Vec<(NaiveDate, Vec<(String, f64)>)> {
        self.events
            .iter()
            .map(|(date, events)| {
                let named = events.iter().map(|(n, f)| (n.clone(), *f)).collect();
                (*date, named)
            })
            .collect()
    }

    pub fn clear_seasonal_pricing(&mut self) {
        self.seasonal.clear();
    }

    pub fn clear_event_pricing(&mut self) {
        self.events.clear();
    }

    pub fn overview(&self) -> PricingOverview {
        PricingOverview {
            base_prices: self.current_base_prices(),
            seasonal_ranges: self.grouped_seasonal_ranges(),
            events: self.event_pricing_info(),
        }
    }
}

/// Human-readable summary of the current pricing rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingOverview {
    pub base_prices: Vec<(RoomCategory, f64)>,
    pub seasonal_ranges: Vec<(DateRangeGroup, f64)>,
    pub events: Vec<(NaiveDate, Vec<(String, f64)>)>,
}

impl std::fmt::Display for PricingOverview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current Base Prices:")?;
        for (category, price) in &self.base_prices {
            writeln!(f, "{category}: ${price:.2}")?;
        }
        writeln!(f, "\nSeasonal Pricing:")?;
        if self.seasonal_ranges.is_empty() {
            writeln!(f, "(none)")?;
        }
        for (range, factor) in &self.seasonal_ranges {
            writeln!(f, "{range}: x{factor}")?;
        }
        writeln!(f, "\nEvent Pricing:")?;
        if self.events.is_empty() {
            writeln!(f, "(none)")?;
        }
        for (date, events) in &self.events {
            for (name, factor) in events {
                writeln!(f, "{date} - {name}: x{factor}")?;
            }
        }
        Ok(())
    }
}
