use approx::assert_relative_eq;
use atlas_marker_editor::codec::share::decode_str;
use atlas_marker_editor::codec::ImportPayload;
use atlas_marker_editor::{decode_share_link, encode_share_link, parse_import, ShareView};
use reqwest::Url;

fn base() -> Url {
    Url::parse("https://atlas.example/map?location=Treston").expect("gültige URL")
}

#[test]
fn test_share_roundtrip_over_valid_range() {
    for &(x, y) in &[(0.0, 0.0), (20_000.0, 20_000.0), (3120.4, 2210.6), (17.0, 19_999.0)] {
        for &zoom in &[-5.0, -2.25, 0.0, 0.04, 1.55, 5.0] {
            let url = encode_share_link(&base(), &ShareView::new(x, y, zoom));
            let view = decode_share_link(&url).expect("gültiger Share-Link");

            assert_relative_eq!(view.x, f64::round(x));
            assert_relative_eq!(view.y, f64::round(y));
            let expected_zoom: f64 = format!("{zoom:.1}").parse().expect("Zahl");
            assert_relative_eq!(view.zoom, expected_zoom);
            assert_eq!(view.marker, None);
        }
    }
}

#[test]
fn test_share_keeps_marker_and_drops_foreign_params() {
    let view = ShareView::new(100.0, 200.0, 1.0).with_marker("default-4");
    let url = encode_share_link(&base(), &view);

    assert!(!url.as_str().contains("location="));
    let decoded = decode_share_link(&url).expect("gültiger Share-Link");
    assert_eq!(decoded.marker.as_deref(), Some("default-4"));
}

#[test]
fn test_share_rejects_incomplete_or_out_of_range_links() {
    assert!(decode_str("https://atlas.example/map?x=100&y=200").is_none());
    assert!(decode_str("https://atlas.example/map?x=25000&y=200&z=0.0").is_none());
    assert!(decode_str("https://atlas.example/map?x=100&y=200&z=7.0").is_none());
    assert!(decode_str("https://atlas.example/map?x=abc&y=200&z=0.0").is_none());
    assert!(decode_str("https://atlas.example/map?x=100&y=200&z=0.0").is_some());
}

#[test]
fn test_import_accepts_both_shapes() {
    let array = parse_import(r#"[{"id":"a","name":"A","type":"city","x":1,"y":2}]"#)
        .expect("Array-Form sollte gültig sein");
    match array {
        ImportPayload::MarkersOnly(markers) => assert_eq!(markers.len(), 1),
        other => panic!("Unerwartete Form: {other:?}"),
    }

    let object = parse_import(r#"{"markers":[]}"#).expect("Objekt-Form sollte gültig sein");
    match object {
        ImportPayload::Full { config, markers } => {
            assert!(config.is_none());
            assert!(markers.is_empty());
        }
        other => panic!("Unerwartete Form: {other:?}"),
    }
}
