//! Use-Case-Funktionen für Import und Export des Gesamtzustands.

use crate::app::MarkerStore;
use crate::codec::{export_document, parse_import, ImportError, ImportPayload};

/// Serialisiert Config-Ausschnitt und Markerliste als Export-Dokument.
pub fn export_snapshot(store: &MarkerStore) -> String {
    export_document(store.map_config().export_view(), store.markers())
}

/// Ersetzt Markerliste (und ggf. Config-Felder) durch ein Import-Dokument.
///
/// Bei Fehlern bleibt der Zustand unverändert. Nach Erfolg ist der Verlauf geleert.
pub fn import_snapshot(store: &mut MarkerStore, document: &str) -> Result<(), ImportError> {
    let payload = parse_import(document).inspect_err(|e| log::warn!("Import abgelehnt: {}", e))?;

    match payload {
        ImportPayload::Full { config, markers } => {
            let count = markers.len();
            let config = config.map(|patch| {
                let mut merged = store.map_config().clone();
                merged.merge(&patch);
                merged
            });
            store.replace_all(markers, config);
            log::info!("Import abgeschlossen: {} Marker (mit Config)", count);
        }
        ImportPayload::MarkersOnly(markers) => {
            let count = markers.len();
            store.replace_all(markers, None);
            log::info!("Import abgeschlossen: {} Marker", count);
        }
    }
    Ok(())
}
