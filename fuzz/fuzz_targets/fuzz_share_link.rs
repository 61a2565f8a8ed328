#![no_main]

use atlas_marker_editor::codec::share::decode_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(view) = decode_str(text) {
        assert!(view.x.is_finite() && view.y.is_finite() && view.zoom.is_finite());
    }
});
