//! Eingebaute Standarddaten, falls weder Cache noch Remote-Quelle verfügbar sind.

use super::SourceSnapshot;
use crate::core::{CurrentLocation, MapConfig, Marker, MarkerType, NewMarker, QuickFact};

/// Standard-Bildbreite der Atlas-Karte.
pub const DEFAULT_IMAGE_WIDTH: u32 = 6144;
/// Standard-Bildhöhe der Atlas-Karte.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 4096;
/// Basis-URL der Referenzseiten.
pub const DEFAULT_PUBLISH_BASE_URL: &str = "https://atlas.example/wiki";

/// Statische Standard-Konfiguration.
pub fn default_map_config() -> MapConfig {
    MapConfig {
        image_width: DEFAULT_IMAGE_WIDTH,
        image_height: DEFAULT_IMAGE_HEIGHT,
        current_location: CurrentLocation {
            name: "Treston".to_string(),
            x: 3120,
            y: 2210,
            zoom: 0.0,
        },
        publish_base_url: DEFAULT_PUBLISH_BASE_URL.to_string(),
    }
}

/// Statische Standard-Marker mit festen IDs.
pub fn fallback_markers() -> Vec<Marker> {
    let entries: [(&str, &str, MarkerType, i32, i32, Option<&str>); 8] = [
        ("default-1", "Auris", MarkerType::Continent, 2900, 1900, None),
        ("default-2", "Westmark", MarkerType::Region, 1650, 2050, None),
        ("default-3", "Ashen Reach", MarkerType::Region, 4400, 1300, None),
        (
            "default-4",
            "Treston",
            MarkerType::City,
            3120,
            2210,
            Some("Capital on the river Lune."),
        ),
        ("default-5", "Greywater", MarkerType::City, 1420, 2600, None),
        ("default-6", "Millbrook", MarkerType::Town, 3390, 2480, None),
        ("default-7", "Old Watchtower", MarkerType::Location, 4010, 1720, None),
        ("default-8", "Saltmere", MarkerType::Town, 1210, 2890, None),
    ];

    let mut markers: Vec<Marker> = entries
        .into_iter()
        .map(|(id, name, marker_type, x, y, description)| {
            let mut marker = NewMarker::new(name, marker_type, x, y).into_marker(id.to_string());
            marker.description = description.map(str::to_string);
            marker
        })
        .collect();

    if let Some(capital) = markers.iter_mut().find(|m| m.id == "default-4") {
        capital.quick_facts.push(QuickFact {
            label: "Population".to_string(),
            value: "48,000".to_string(),
        });
    }
    markers
}

/// Kompletter Fallback-Stand.
pub fn fallback_snapshot() -> SourceSnapshot {
    SourceSnapshot {
        markers: fallback_markers(),
        config: default_map_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fallback_ids_are_unique_and_inside_image() {
        let snapshot = fallback_snapshot();
        let ids: HashSet<_> = snapshot.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), snapshot.markers.len());
        assert!(snapshot
            .markers
            .iter()
            .all(|m| snapshot.config.contains(m.x, m.y)));
    }

    #[test]
    fn default_start_is_inside_image() {
        let config = default_map_config();
        let loc = &config.current_location;
        assert!(config.contains(loc.x, loc.y));
    }
}
