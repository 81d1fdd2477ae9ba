use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::room::RoomCategory;
use crate::domain::statistics::DanglingRoomPolicy;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub reports: ReportConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    #[serde(default = "default_base_prices")]
    pub base_prices: BTreeMap<RoomCategory, f64>,
    #[serde(default)]
    pub seasons: Vec<SeasonRule>,
    #[serde(default)]
    pub events: Vec<EventRule>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_prices: default_base_prices(),
            seasons: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Seasonal multiplier over an inclusive date range.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeasonRule {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventRule {
    pub date: NaiveDate,
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Default cancellation report window: from this many days before today
    /// through today, inclusive (`n + 1` calendar days).
    #[serde(default = "default_cancellation_lookback")]
    pub cancellation_lookback_days: u32,
    #[serde(default)]
    pub on_dangling_room: DanglingRoomPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cancellation_lookback_days: default_cancellation_lookback(),
            on_dangling_room: DanglingRoomPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DataConfig {
    /// YAML file with `rooms` and `reservations` to preload.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

fn default_base_prices() -> BTreeMap<RoomCategory, f64> {
    BTreeMap::from([
        (RoomCategory::Single, 100.0),
        (RoomCategory::Double, 150.0),
        (RoomCategory::Suite, 250.0),
    ])
}

fn default_cancellation_lookback() -> u32 {
    30
}
