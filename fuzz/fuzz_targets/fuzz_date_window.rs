#![no_main]
use libfuzzer_sys::fuzz_target;

use hotel_pricing::domain::date_window::DateWindow;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Some((start, end)) = text.split_once(',')
        && let Ok(window) = DateWindow::parse(start, end)
    {
        assert_eq!(window.is_empty(), window.len_days() == 0);
    }
});
