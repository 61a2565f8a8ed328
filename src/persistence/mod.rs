//! Lokaler Key/Value-Cache: Port plus Speicher- und Datei-Implementierung.
//!
//! Die Engine legt drei Slots ab: Markerliste, Kartenkonfiguration und den
//! Zeitstempel des letzten Remote-Abrufs.

mod file_store;
mod slots;

pub use file_store::FileStore;
pub use slots::{
    read_config, read_last_fetch, read_markers, write_config, write_last_fetch, write_markers,
    CONFIG_KEY, LAST_FETCH_KEY, MARKERS_KEY,
};

use std::collections::HashMap;

/// Dauerhafter String-Speicher mit Schlüsselzugriff.
pub trait KeyValueStore: Send {
    /// Liest einen Wert. `Ok(None)` wenn der Schlüssel fehlt.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Schreibt einen Wert (überschreibt vorhandene).
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Flüchtiger Speicher für Tests und Headless-Läufe ohne Cache-Verzeichnis.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Erstellt einen leeren Speicher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl gespeicherter Schlüssel.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Gibt `true` zurück, wenn nichts gespeichert ist.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.len(), 1);
    }
}
