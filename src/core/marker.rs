//! Marker-Datenmodell: typisierte Points of Interest auf dem Kartenbild.

use crate::shared::options::{CITY_MIN_ZOOM, DETAIL_MIN_ZOOM, REGION_MIN_ZOOM};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Geschlossene Menge der Marker-Typen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    /// Kontinent (immer sichtbar)
    Continent,
    /// Stadt
    City,
    /// Region
    Region,
    /// Einzelner Ort (Ruine, Turm, …)
    Location,
    /// Dorf
    Town,
}

impl MarkerType {
    /// Alle Typen in Legenden-Reihenfolge.
    pub const ALL: [MarkerType; 5] = [
        MarkerType::Continent,
        MarkerType::Region,
        MarkerType::City,
        MarkerType::Town,
        MarkerType::Location,
    ];

    /// Anzeigename für Legende und Tooltip.
    pub fn label(self) -> &'static str {
        match self {
            MarkerType::Continent => "Continent",
            MarkerType::City => "City",
            MarkerType::Region => "Region",
            MarkerType::Location => "Location",
            MarkerType::Town => "Town",
        }
    }

    /// Standard-Farbe als Hex-String.
    pub fn color(self) -> &'static str {
        match self {
            MarkerType::Continent => "#8e44ad",
            MarkerType::City => "#c0392b",
            MarkerType::Region => "#27ae60",
            MarkerType::Location => "#2980b9",
            MarkerType::Town => "#d35400",
        }
    }

    /// Pfad-Abschnitt für abgeleitete Referenz-Links.
    pub fn link_section(self) -> &'static str {
        match self {
            MarkerType::Continent => "continents",
            MarkerType::City => "cities",
            MarkerType::Region => "regions",
            MarkerType::Location => "locations",
            MarkerType::Town => "towns",
        }
    }

    /// Rang für die abgeleitete Anzeige-Reihenfolge (kleiner = weiter oben).
    pub fn display_rank(self) -> u8 {
        match self {
            MarkerType::Continent => 0,
            MarkerType::Region => 1,
            MarkerType::City => 2,
            MarkerType::Town => 3,
            MarkerType::Location => 4,
        }
    }

    /// Minimaler Zoom, ab dem Marker dieses Typs sichtbar sind.
    pub fn min_zoom(self) -> f64 {
        match self {
            MarkerType::Continent => f64::NEG_INFINITY,
            MarkerType::Region => REGION_MIN_ZOOM,
            MarkerType::City => CITY_MIN_ZOOM,
            MarkerType::Location | MarkerType::Town => DETAIL_MIN_ZOOM,
        }
    }

    /// Prüft die Zoom-Sichtbarkeit.
    pub fn is_visible_at_zoom(self, zoom: f64) -> bool {
        zoom >= self.min_zoom()
    }
}

/// Schlüssel/Wert-Annotation für die Vorschau. Schlüssel dürfen sich wiederholen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFact {
    pub label: String,
    pub value: String,
}

/// Ein benannter Point of Interest an einer Pixel-Koordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Eindeutige, unveränderliche ID
    pub id: String,
    /// Anzeigename (nicht leer)
    pub name: String,
    /// Marker-Typ
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
    /// Pixel-X im Bildraum
    pub x: i32,
    /// Pixel-Y im Bildraum (wächst nach unten)
    pub y: i32,
    /// Relativer Pfad zur Referenzseite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Freitext-Beschreibung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kurzinfos für die Vorschau
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_facts: Vec<QuickFact>,
}

/// Marker ohne ID, wie ihn die Präsentationsschicht beim Anlegen übergibt.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarker {
    pub name: String,
    pub marker_type: MarkerType,
    pub x: i32,
    pub y: i32,
    pub link: Option<String>,
    pub description: Option<String>,
    pub quick_facts: Vec<QuickFact>,
}

impl NewMarker {
    /// Erstellt einen minimalen neuen Marker.
    pub fn new(name: impl Into<String>, marker_type: MarkerType, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            marker_type,
            x,
            y,
            link: None,
            description: None,
            quick_facts: Vec::new(),
        }
    }

    /// Setzt die Beschreibung (Builder).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Vergibt die ID und erzeugt den fertigen Marker.
    pub fn into_marker(self, id: String) -> Marker {
        Marker {
            id,
            name: self.name,
            marker_type: self.marker_type,
            x: self.x,
            y: self.y,
            link: self.link,
            description: self.description,
            quick_facts: self.quick_facts,
        }
    }
}

/// Teil-Update eines Markers. `None` = Feld unverändert.
///
/// Optionale Felder nutzen `Option<Option<_>>`: `Some(None)` entfernt den Wert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerPatch {
    pub name: Option<String>,
    pub marker_type: Option<MarkerType>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub link: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub quick_facts: Option<Vec<QuickFact>>,
}

impl MarkerPatch {
    /// Patch, der nur die Position setzt.
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch, der nur den Namen setzt.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Prüft, ob der Patch überhaupt etwas ändert.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Mergt die gesetzten Felder in den Marker. Die ID bleibt unangetastet.
    pub fn apply_to(&self, marker: &mut Marker) {
        if let Some(name) = &self.name {
            marker.name = name.clone();
        }
        if let Some(marker_type) = self.marker_type {
            marker.marker_type = marker_type;
        }
        if let Some(x) = self.x {
            marker.x = x;
        }
        if let Some(y) = self.y {
            marker.y = y;
        }
        if let Some(link) = &self.link {
            marker.link = link.clone();
        }
        if let Some(description) = &self.description {
            marker.description = description.clone();
        }
        if let Some(quick_facts) = &self.quick_facts {
            marker.quick_facts = quick_facts.clone();
        }
    }
}

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("statisches Regex-Pattern"));

/// Erzeugt einen URL-tauglichen Slug ("Port Treston" → "port-treston").
pub fn slugify(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Pixel-Koordinaten dürfen nicht negativ sein. Die Obergrenze (Bildgröße)
/// wird nicht erzwungen.
pub fn is_valid_position(x: i32, y: i32) -> bool {
    x >= 0 && y >= 0
}

impl Marker {
    /// Prüft die Untergrenze der Pixel-Koordinaten.
    pub fn has_valid_position(&self) -> bool {
        is_valid_position(self.x, self.y)
    }

    /// Relativer Referenz-Pfad: expliziter `link` oder aus Typ + Name abgeleitet.
    pub fn reference_path(&self) -> String {
        match &self.link {
            Some(link) if !link.trim().is_empty() => link.clone(),
            _ => format!("{}/{}", self.marker_type.link_section(), slugify(&self.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Marker {
        NewMarker::new("Port Treston", MarkerType::City, 100, 200).into_marker("m1".into())
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Port  Treston! "), "port-treston");
        assert_eq!(slugify("Ål-Vik's Rest"), "l-vik-s-rest");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn reference_path_prefers_explicit_link() {
        let mut marker = sample();
        assert_eq!(marker.reference_path(), "cities/port-treston");
        marker.link = Some("lore/treston".into());
        assert_eq!(marker.reference_path(), "lore/treston");
        marker.link = Some("   ".into());
        assert_eq!(marker.reference_path(), "cities/port-treston");
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut marker = sample();
        marker.description = Some("Hafen".into());

        let patch = MarkerPatch {
            x: Some(5),
            description: Some(None),
            ..MarkerPatch::default()
        };
        patch.apply_to(&mut marker);

        assert_eq!(marker.id, "m1");
        assert_eq!(marker.name, "Port Treston");
        assert_eq!((marker.x, marker.y), (5, 200));
        assert_eq!(marker.description, None);
        assert!(MarkerPatch::default().is_empty());
        assert!(!MarkerPatch::position(1, 2).is_empty());
    }

    #[test]
    fn negative_pixels_are_invalid() {
        assert!(is_valid_position(0, 0));
        assert!(is_valid_position(99_999, 3));
        assert!(!is_valid_position(-1, 0));
        assert!(!is_valid_position(0, -1));

        let mut marker = sample();
        assert!(marker.has_valid_position());
        marker.y = -20;
        assert!(!marker.has_valid_position());
    }

    #[test]
    fn zoom_thresholds_follow_type_hierarchy() {
        assert!(MarkerType::Continent.is_visible_at_zoom(-5.0));
        assert!(!MarkerType::Region.is_visible_at_zoom(-3.0));
        assert!(MarkerType::Region.is_visible_at_zoom(-2.0));
        assert!(!MarkerType::City.is_visible_at_zoom(-1.5));
        assert!(MarkerType::City.is_visible_at_zoom(0.0));
        assert!(!MarkerType::Town.is_visible_at_zoom(0.0));
        assert!(MarkerType::Location.is_visible_at_zoom(1.0));
    }

    #[test]
    fn serde_uses_wire_names() {
        let mut marker = sample();
        marker.quick_facts.push(QuickFact {
            label: "Population".into(),
            value: "12000".into(),
        });
        let json = serde_json::to_value(&marker).expect("serialisierbar");
        assert_eq!(json["type"], "city");
        assert_eq!(json["quickFacts"][0]["label"], "Population");
        assert!(json.get("link").is_none());

        let parsed: Marker =
            serde_json::from_str(r#"{"id":"1","name":"A","type":"town","x":1,"y":1}"#)
                .expect("minimaler Marker");
        assert_eq!(parsed.marker_type, MarkerType::Town);
        assert!(parsed.quick_facts.is_empty());
    }
}
