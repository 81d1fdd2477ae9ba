#![no_main]
use chrono::{NaiveDate, TimeDelta};
use libfuzzer_sys::fuzz_target;

use hotel_pricing::domain::pricing::PricingTables;

// Each 3-byte chunk is (start offset, length, factor) within one year.
fuzz_target!(|data: &[u8]| {
    let Some(origin) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
        return;
    };
    let mut tables = PricingTables::default();
    for chunk in data.chunks_exact(3) {
        let start = origin + TimeDelta::days(i64::from(chunk[0]));
        let end = start + TimeDelta::days(i64::from(chunk[1] % 32));
        let factor = f64::from(chunk[2] % 8 + 1) / 2.0;
        let _ = tables.set_seasonal_multiplier(start, end, factor);
    }
    let groups = tables.grouped_seasonal_ranges();
    for pair in groups.windows(2) {
        assert!(pair[0].0.end < pair[1].0.start);
    }
    for (range, factor) in &groups {
        let mut day = range.start;
        while day <= range.end {
            assert!((tables.seasonal_multiplier_on(day) - factor).abs() < f64::EPSILON);
            day += TimeDelta::days(1);
        }
    }
});
