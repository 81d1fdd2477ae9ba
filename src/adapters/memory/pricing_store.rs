use std::sync::RwLock;

use chrono::NaiveDate;

use crate::config::types::PricingConfig;
use crate::domain::pricing::PricingTables;
use crate::domain::room::RoomCategory;
use crate::error::{HotelError, Result};
use crate::ports::pricing_store::PricingStore;

/// Pricing tables behind a single lock; every mutation happens under the
/// write guard, so readers see either the old or the new tables.
#[derive(Debug, Default)]
pub struct InMemoryPricingStore {
    inner: RwLock<PricingTables>,
}

impl InMemoryPricingStore {
    pub fn new(tables: PricingTables) -> Self {
        Self {
            inner: RwLock::new(tables),
        }
    }

    /// Build the tables from configured base prices, seasons and events.
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let mut tables = PricingTables::default();
        for (category, price) in &config.base_prices {
            tables.update_base_price(*category, *price)?;
        }
        for season in &config.seasons {
            tables.set_seasonal_multiplier(season.start, season.end, season.multiplier)?;
        }
        for event in &config.events {
            tables.set_event_pricing(event.date, &event.name, event.multiplier)?;
        }
        tracing::info!(
            seasons = config.seasons.len(),
            events = config.events.len(),
            "Loaded pricing rules"
        );
        Ok(Self::new(tables))
    }

    fn write<T>(&self, op: &str, f: impl FnOnce(&mut PricingTables) -> Result<T>) -> Result<T> {
        let mut tables = self.inner.write().map_err(|_| {
            tracing::error!("Pricing lock poisoned on {op}");
            HotelError::Storage(format!("pricing lock poisoned on {op}"))
        })?;
        f(&mut tables)
    }
}

impl PricingStore for InMemoryPricingStore {
    fn snapshot(&self) -> Result<PricingTables> {
        self.inner.read().map(|t| t.clone()).map_err(|_| {
            tracing::error!("Pricing lock poisoned on snapshot");
            HotelError::Storage("pricing lock poisoned on snapshot".into())
        })
    }

    fn update_base_price(&self, category: RoomCategory, new_price: f64) -> Result<()> {
        self.write("update_base_price", |t| t.update_base_price(category, new_price))?;
        tracing::info!(%category, new_price, "Updated base price");
        Ok(())
    }

    fn set_seasonal_multiplier(&self, start: NaiveDate, end: NaiveDate, factor: f64) -> Result<()> {
        self.write("set_seasonal_multiplier", |t| {
            t.set_seasonal_multiplier(start, end, factor)
        })?;
        tracing::info!(%start, %end, factor, "Set seasonal multiplier");
        Ok(())
    }

    fn set_event_pricing(&self, date: NaiveDate, name: &str, factor: f64) -> Result<()> {
        self.write("set_event_pricing", |t| t.set_event_pricing(date, name, factor))?;
        tracing::info!(%date, name, factor, "Set event pricing");
        Ok(())
    }

    fn clear_seasonal_pricing(&self) -> Result<()> {
        self.write("clear_seasonal_pricing", |t| {
            t.clear_seasonal_pricing();
            Ok(())
        })?;
        tracing::info!("Cleared seasonal pricing");
        Ok(())
    }

    fn clear_event_pricing(&self) -> Result<()> {
        self.write("clear_event_pricing", |t| {
            t.clear_event_pricing();
            Ok(())
        })?;
        tracing::info!("Cleared event pricing");
        Ok(())
    }
}
