//! Share-Links: Ansichtsposition und Zoom als Query-Parameter.
//!
//! Format: `?x=<int>&y=<int>&z=<zoom, eine Nachkommastelle>[&marker=<id>]`.
//! Vorhandene Query-Parameter der Basis-URL werden verworfen.

use crate::core::MapConfig;
use crate::shared::options::{SHARE_COORD_MAX, SHARE_ZOOM_MAX, SHARE_ZOOM_MIN};
use reqwest::Url;

/// Geteilte Ansicht (Pixel-Position im Bildraum plus Zoom).
#[derive(Debug, Clone, PartialEq)]
pub struct ShareView {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    /// Optional hervorgehobener Marker (opake ID)
    pub marker: Option<String>,
}

impl ShareView {
    /// Ansicht ohne Marker.
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self {
            x,
            y,
            zoom,
            marker: None,
        }
    }

    /// Startpunkt der Karte (`currentLocation`), im Bildraum.
    pub fn start_of(config: &MapConfig) -> Self {
        let loc = &config.current_location;
        Self::new(f64::from(loc.x), f64::from(loc.y), loc.zoom)
    }

    /// Setzt den hervorgehobenen Marker (Builder).
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }
}

/// Baut die Share-URL auf Basis der aktuellen Seiten-URL.
pub fn encode(base: &Url, view: &ShareView) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("x", &(view.x.round() as i64).to_string())
            .append_pair("y", &(view.y.round() as i64).to_string())
            .append_pair("z", &format!("{:.1}", view.zoom));
        if let Some(marker) = &view.marker {
            query.append_pair("marker", marker);
        }
    }
    url
}

/// Liest eine geteilte Ansicht aus einer URL.
///
/// `None`, wenn `x`, `y` oder `z` fehlen, nicht numerisch sind oder außerhalb
/// von `0 ≤ x,y ≤ 20000` bzw. `-5 ≤ z ≤ 5` liegen.
pub fn decode(url: &Url) -> Option<ShareView> {
    let mut x = None;
    let mut y = None;
    let mut z = None;
    let mut marker = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "x" => x = Some(value.into_owned()),
            "y" => y = Some(value.into_owned()),
            "z" => z = Some(value.into_owned()),
            "marker" => marker = Some(value.into_owned()),
            _ => {}
        }
    }

    let x = parse_number(x.as_deref()?)?;
    let y = parse_number(y.as_deref()?)?;
    let zoom = parse_number(z.as_deref()?)?;

    let coord_ok = |v: f64| (0.0..=SHARE_COORD_MAX).contains(&v);
    if !coord_ok(x) || !coord_ok(y) || !(SHARE_ZOOM_MIN..=SHARE_ZOOM_MAX).contains(&zoom) {
        log::debug!("Share-Link außerhalb des gültigen Bereichs: x={x}, y={y}, z={zoom}");
        return None;
    }

    Some(ShareView {
        x,
        y,
        zoom,
        marker,
    })
}

/// Wie [`decode`], aber direkt aus einem String.
pub fn decode_str(url: &str) -> Option<ShareView> {
    Url::parse(url).ok().as_ref().and_then(decode)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
