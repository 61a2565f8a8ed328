#![no_main]

use atlas_marker_editor::{export_document, parse_import};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(payload) = parse_import(text) else {
        return;
    };

    // Akzeptierte Marker müssen sich erneut exportieren und importieren lassen.
    let config = atlas_marker_editor::remote::default_map_config().export_view();
    let document = export_document(config, payload.markers());
    let reparsed = parse_import(&document).expect("Export muss importierbar sein");
    assert_eq!(reparsed.markers(), payload.markers());
});
