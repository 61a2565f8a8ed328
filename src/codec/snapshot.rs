//! Import/Export-Dokument der Engine.
//!
//! Export: `{ config: { imageWidth, imageHeight, currentLocation }, markers: [...] }`,
//! stabil eingerückt. Import akzeptiert zusätzlich ein nacktes Marker-Array.

use crate::core::{ConfigPatch, ExportConfig, Marker};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Fehler beim Einlesen eines Import-Dokuments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// Kein gültiges JSON.
    #[error("Dokument nicht lesbar: {0}")]
    Malformed(String),
    /// Gültiges JSON, aber weder `{config, markers}` noch `Marker[]`.
    #[error("Unbekannte Dokumentstruktur")]
    UnrecognizedShape,
}

/// Serialisierte Form für Export und Remote-Payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub config: ExportConfig,
    pub markers: Vec<Marker>,
}

/// Ergebnis der Form-Erkennung beim Import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    /// Objekt-Form: Marker ersetzen, Config-Felder (falls vorhanden) mergen.
    Full {
        config: Option<ConfigPatch>,
        markers: Vec<Marker>,
    },
    /// Array-Form: nur Marker ersetzen.
    MarkersOnly(Vec<Marker>),
}

impl ImportPayload {
    /// Die importierten Marker.
    pub fn markers(&self) -> &[Marker] {
        match self {
            ImportPayload::Full { markers, .. } | ImportPayload::MarkersOnly(markers) => markers,
        }
    }
}

#[derive(Deserialize)]
struct ObjectShape {
    #[serde(default)]
    config: Option<ConfigPatch>,
    markers: Vec<Marker>,
}

/// Erzeugt das Export-Dokument (pretty-printed, deterministische Feldreihenfolge).
pub fn export_document(config: ExportConfig, markers: &[Marker]) -> String {
    let document = SnapshotDocument {
        config,
        markers: markers.to_vec(),
    };
    // Nur Strings, Zahlen und Enums: Serialisierung kann nicht fehlschlagen
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

/// Parst ein Import-Dokument und erkennt die Form.
pub fn parse_import(document: &str) -> Result<ImportPayload, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(document).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let payload = match value {
        serde_json::Value::Array(_) => serde_json::from_value::<Vec<Marker>>(value)
            .map(ImportPayload::MarkersOnly)
            .map_err(|e| {
                log::debug!("Marker-Array nicht lesbar: {}", e);
                ImportError::UnrecognizedShape
            })?,
        serde_json::Value::Object(_) => {
            let shape: ObjectShape = serde_json::from_value(value).map_err(|e| {
                log::debug!("Objekt-Form nicht lesbar: {}", e);
                ImportError::UnrecognizedShape
            })?;
            ImportPayload::Full {
                config: shape.config,
                markers: shape.markers,
            }
        }
        _ => return Err(ImportError::UnrecognizedShape),
    };

    validate(&payload)?;
    Ok(payload)
}

/// Marker-IDs müssen eindeutig, Namen nicht leer, Positionen nicht negativ
/// und Bildgrößen positiv sein.
fn validate(payload: &ImportPayload) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for marker in payload.markers() {
        if marker.name.trim().is_empty()
            || !marker.has_valid_position()
            || !seen.insert(marker.id.as_str())
        {
            log::debug!("Ungültiger Marker im Import: id='{}'", marker.id);
            return Err(ImportError::UnrecognizedShape);
        }
    }
    if let ImportPayload::Full {
        config: Some(config),
        ..
    } = payload
    {
        if !config.is_valid() {
            return Err(ImportError::UnrecognizedShape);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrentLocation, MarkerType, NewMarker};

    fn export_config() -> ExportConfig {
        ExportConfig {
            image_width: 6000,
            image_height: 4000,
            current_location: CurrentLocation {
                name: "Treston".into(),
                x: 10,
                y: 20,
                zoom: 0.0,
            },
        }
    }

    #[test]
    fn export_has_stable_layout() {
        let markers = vec![NewMarker::new("A", MarkerType::Town, 1, 2).into_marker("1".into())];
        let doc = export_document(export_config(), &markers);

        assert!(doc.starts_with("{\n  \"config\": {\n    \"imageWidth\": 6000,"));
        assert!(doc.contains("\"currentLocation\""));
        assert!(!doc.contains("publishBaseUrl"));
        assert_eq!(doc, export_document(export_config(), &markers));
    }

    #[test]
    fn object_shape_without_config_is_accepted() {
        let payload =
            parse_import(r#"{"markers":[{"id":"1","name":"A","type":"town","x":1,"y":1}]}"#)
                .expect("gültig");
        match payload {
            ImportPayload::Full { config, markers } => {
                assert!(config.is_none());
                assert_eq!(markers.len(), 1);
            }
            other => panic!("Unerwartete Form: {other:?}"),
        }
    }

    #[test]
    fn bare_array_is_accepted() {
        let payload = parse_import(r#"[{"id":"1","name":"A","type":"city","x":1,"y":1}]"#)
            .expect("gültig");
        assert!(matches!(payload, ImportPayload::MarkersOnly(ref m) if m.len() == 1));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            parse_import("not json"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn foreign_shapes_are_unrecognized() {
        for doc in [
            "42",
            r#""markers""#,
            r#"{"config":{}}"#,
            r#"{"markers":{"id":"1"}}"#,
            r#"[{"id":"1","name":"A","type":"castle","x":1,"y":1}]"#,
            r#"[{"id":"1","name":"A","type":"city","x":1,"y":1},{"id":"1","name":"B","type":"city","x":2,"y":2}]"#,
            r#"[{"id":"1","name":" ","type":"city","x":1,"y":1}]"#,
            r#"{"config":{"imageWidth":0},"markers":[]}"#,
        ] {
            assert_eq!(
                parse_import(doc),
                Err(ImportError::UnrecognizedShape),
                "Dokument: {doc}"
            );
        }
    }

    #[test]
    fn negative_positions_are_unrecognized() {
        for doc in [
            r#"[{"id":"1","name":"A","type":"town","x":-5,"y":-5}]"#,
            r#"{"markers":[{"id":"1","name":"A","type":"town","x":3,"y":-1}]}"#,
        ] {
            assert_eq!(
                parse_import(doc),
                Err(ImportError::UnrecognizedShape),
                "Dokument: {doc}"
            );
        }
    }

    #[test]
    fn exported_document_imports_as_full_payload() {
        let markers = vec![NewMarker::new("A", MarkerType::Town, 1, 2).into_marker("1".into())];
        let doc = export_document(export_config(), &markers);
        match parse_import(&doc).expect("Export ist importierbar") {
            ImportPayload::Full { config, markers: imported } => {
                assert_eq!(imported, markers);
                assert_eq!(config, Some(ConfigPatch::from(export_config())));
            }
            other => panic!("Unerwartete Form: {other:?}"),
        }
    }
}
