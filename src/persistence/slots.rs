//! Typisierte Lese-/Schreibzugriffe auf die Cache-Slots.
//!
//! Lesefehler und kaputte Inhalte werden geloggt und als "kein Wert" behandelt.
//! Schreibfehler werden geloggt und nicht weitergereicht (fire-and-forget).

use super::KeyValueStore;
use crate::core::{MapConfig, Marker};
use chrono::{DateTime, Utc};

/// Slot für die Markerliste (JSON-Array).
pub const MARKERS_KEY: &str = "atlas_markers";
/// Slot für die Kartenkonfiguration (JSON-Objekt).
pub const CONFIG_KEY: &str = "atlas_map_config";
/// Slot für den letzten Remote-Abruf (Epoch-Millisekunden als String).
pub const LAST_FETCH_KEY: &str = "atlas_last_fetch";

fn read_slot(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Cache-Slot '{}' nicht lesbar: {:#}", key, e);
            None
        }
    }
}

fn write_slot(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Cache-Slot '{}' nicht schreibbar: {:#}", key, e);
    }
}

/// Liest die gecachte Markerliste.
pub fn read_markers(store: &dyn KeyValueStore) -> Option<Vec<Marker>> {
    let raw = read_slot(store, MARKERS_KEY)?;
    serde_json::from_str(&raw)
        .inspect_err(|e| log::warn!("Gecachte Markerliste verworfen: {}", e))
        .ok()
}

/// Schreibt die Markerliste.
pub fn write_markers(store: &mut dyn KeyValueStore, markers: &[Marker]) {
    match serde_json::to_string(markers) {
        Ok(json) => write_slot(store, MARKERS_KEY, &json),
        Err(e) => log::warn!("Markerliste nicht serialisierbar: {}", e),
    }
}

/// Liest die gecachte Kartenkonfiguration.
pub fn read_config(store: &dyn KeyValueStore) -> Option<MapConfig> {
    let raw = read_slot(store, CONFIG_KEY)?;
    serde_json::from_str(&raw)
        .inspect_err(|e| log::warn!("Gecachte Kartenkonfiguration verworfen: {}", e))
        .ok()
}

/// Schreibt die Kartenkonfiguration.
pub fn write_config(store: &mut dyn KeyValueStore, config: &MapConfig) {
    match serde_json::to_string(config) {
        Ok(json) => write_slot(store, CONFIG_KEY, &json),
        Err(e) => log::warn!("Kartenkonfiguration nicht serialisierbar: {}", e),
    }
}

/// Liest den Zeitpunkt des letzten erfolgreichen Remote-Abrufs.
pub fn read_last_fetch(store: &dyn KeyValueStore) -> Option<DateTime<Utc>> {
    let raw = read_slot(store, LAST_FETCH_KEY)?;
    let millis: i64 = raw.trim().parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Schreibt den Zeitpunkt des letzten erfolgreichen Remote-Abrufs.
pub fn write_last_fetch(store: &mut dyn KeyValueStore, at: DateTime<Utc>) {
    write_slot(store, LAST_FETCH_KEY, &at.timestamp_millis().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarkerType, NewMarker};
    use crate::persistence::MemoryStore;

    #[test]
    fn markers_roundtrip_through_slot() {
        let mut store = MemoryStore::new();
        let markers =
            vec![NewMarker::new("Treston", MarkerType::City, 1, 2).into_marker("a".into())];
        write_markers(&mut store, &markers);
        assert_eq!(read_markers(&store), Some(markers));
    }

    #[test]
    fn corrupt_slot_reads_as_missing() {
        let mut store = MemoryStore::new();
        store.set(MARKERS_KEY, "{kaputt").unwrap();
        store.set(LAST_FETCH_KEY, "gestern").unwrap();
        assert_eq!(read_markers(&store), None);
        assert_eq!(read_last_fetch(&store), None);
        assert_eq!(read_config(&store), None);
    }

    #[test]
    fn last_fetch_is_stored_as_epoch_millis() {
        let mut store = MemoryStore::new();
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        write_last_fetch(&mut store, at);
        assert_eq!(
            store.get(LAST_FETCH_KEY).unwrap().as_deref(),
            Some("1700000000123")
        );
        assert_eq!(read_last_fetch(&store), Some(at));
    }
}
