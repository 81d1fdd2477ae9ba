#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = hotel_pricing::adapters::fixture::parse_fixture(yaml);
    }
});
