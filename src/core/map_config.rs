//! Kartenkonfiguration: Bildgröße, Startpunkt und Basis-URL für Referenzen.

use super::coords::CoordinateTransform;
use super::marker::Marker;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Markerähnlicher Anker für die "Zum Start"-Aktion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub zoom: f64,
}

/// Beschreibt die Bildfläche und den ausgezeichneten Startpunkt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Bildbreite in Pixeln (> 0)
    pub image_width: u32,
    /// Bildhöhe in Pixeln (> 0)
    pub image_height: u32,
    /// Startpunkt der Ansicht
    pub current_location: CurrentLocation,
    /// Basis für absolute Referenz-URLs
    #[serde(default)]
    pub publish_base_url: String,
}

/// Teilmenge der Konfiguration, wie sie Export-Dokument und Remote-Quelle tragen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub current_location: CurrentLocation,
}

/// Konfigurations-Felder, die beim Import/Refresh in die Live-Config gemergt werden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<CurrentLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_base_url: Option<String>,
}

impl ConfigPatch {
    /// Bildgrößen müssen positiv sein, sofern gesetzt.
    pub fn is_valid(&self) -> bool {
        self.image_width != Some(0) && self.image_height != Some(0)
    }
}

impl MapConfig {
    /// Koordinaten-Abbildung für die aktuelle Bildhöhe.
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.image_height)
    }

    /// Anzeige-Grenzen der Karte als (südwest, nordost).
    pub fn display_bounds(&self) -> (DVec2, DVec2) {
        self.transform().display_bounds(self.image_width)
    }

    /// Startansicht: Position im Anzeigeraum plus Zoom.
    pub fn start_view(&self) -> (DVec2, f64) {
        let loc = &self.current_location;
        (self.transform().to_display(loc.x, loc.y), loc.zoom)
    }

    /// Prüft, ob ein Pixel innerhalb der Bildfläche liegt.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let inside = |v: i32, max: u32| u32::try_from(v).is_ok_and(|v| v <= max);
        inside(x, self.image_width) && inside(y, self.image_height)
    }

    /// Absolute Referenz-URL eines Markers.
    pub fn reference_url(&self, marker: &Marker) -> String {
        let base = self.publish_base_url.trim_end_matches('/');
        let path = marker.reference_path();
        let path = path.trim_start_matches('/');
        if base.is_empty() {
            path.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Für den Export relevante Teilmenge.
    pub fn export_view(&self) -> ExportConfig {
        ExportConfig {
            image_width: self.image_width,
            image_height: self.image_height,
            current_location: self.current_location.clone(),
        }
    }

    /// Mergt die gesetzten Felder eines Patches.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        if let Some(width) = patch.image_width {
            self.image_width = width;
        }
        if let Some(height) = patch.image_height {
            self.image_height = height;
        }
        if let Some(location) = &patch.current_location {
            self.current_location = location.clone();
        }
        if let Some(base) = &patch.publish_base_url {
            self.publish_base_url = base.clone();
        }
    }
}

impl From<ExportConfig> for ConfigPatch {
    fn from(config: ExportConfig) -> Self {
        Self {
            image_width: Some(config.image_width),
            image_height: Some(config.image_height),
            current_location: Some(config.current_location),
            publish_base_url: None,
        }
    }
}
