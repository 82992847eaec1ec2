#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Either a document or a non-empty error list, never a panic
        if let Err(errors) = podshift::parse_compose(content) {
            assert!(!errors.is_empty());
        }
    }
});
