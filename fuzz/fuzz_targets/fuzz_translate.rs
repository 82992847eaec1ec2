#![no_main]

use libfuzzer_sys::fuzz_target;
use podshift::{OutputFormat, Translator};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(content, format);
            assert!(result.errors.is_empty() || result.output.is_empty());
        }
    }
});
