#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Anything that parses must serialize back unchanged
        if let Ok(document) = projsync::document::parse(content) {
            assert_eq!(projsync::document::serialize(&document), content);
        }
    }
});
