use chrono::NaiveDate;

use crate::domain::pricing::PricingTables;
use crate::domain::room::RoomCategory;
use crate::error::Result;

/// Owner of the base price table and the seasonal/event multiplier tables.
///
/// Mutations are all-or-nothing: readers never observe a partially applied
/// seasonal range.
pub trait PricingStore: Send + Sync {
    /// Consistent copy of the current tables for pricing and reporting.
    fn snapshot(&self) -> Result<PricingTables>;

    fn base_price(&self, category: RoomCategory) -> Result<f64> {
        Ok(self.snapshot()?.base_price(category))
    }

    fn update_base_price(&self, category: RoomCategory, new_price: f64) -> Result<()>;
    fn set_seasonal_multiplier(&self, start: NaiveDate, end: NaiveDate, factor: f64) -> Result<()>;
    fn set_event_pricing(&self, date: NaiveDate, name: &str, factor: f64) -> Result<()>;
    fn clear_seasonal_pricing(&self) -> Result<()>;
    fn clear_event_pricing(&self) -> Result<()>;
}
