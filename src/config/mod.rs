pub mod types;

use std::path::Path;

use crate::error::{HotelError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        HotelError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomCategory;
    use std::io::Write as _;

    #[test]
    fn load_config_missing_file_returns_defaults() {
        let result = load_config(Path::new("/tmp/nonexistent_hotel_config_12345.yaml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.reports.cancellation_lookback_days, 30);
    }

    #[test]
    fn load_config_valid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "pricing:\n  base_prices:\n    SINGLE: 90.0\n    SUITE: 300.0\nreports:\n  cancellation_lookback_days: 14\ndata:\n  fixture_path: /var/lib/hotel/fixture.yaml"
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert!((config.pricing.base_prices[&RoomCategory::Single] - 90.0).abs() < f64::EPSILON);
        // An explicit map replaces the defaults entirely
        assert!(!config.pricing.base_prices.contains_key(&RoomCategory::Double));
        assert_eq!(config.reports.cancellation_lookback_days, 14);
        assert!(config.data.fixture_path.is_some());
    }

    #[test]
    fn load_config_events() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "pricing:\n  events:\n    - date: 2024-12-31\n      name: NewYear\n      multiplier: 3.0"
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.pricing.events[0].name, "NewYear");
        // base prices should get defaults
        assert_eq!(config.pricing.base_prices.len(), 3);
    }

    #[test]
    fn load_config_empty_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp).unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.pricing.base_prices.len(), 3);
        assert_eq!(config.reports.cancellation_lookback_days, 30);
    }

    #[test]
    fn load_config_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "{{{{invalid yaml: [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(result.is_err());
    }
}
