//! Refresh-Protokoll gegen die Remote-Quelle.
//!
//! Der Store wird nur kurz vor und nach dem Abruf gesperrt. Während der Abruf
//! läuft, bleiben CRUD-Operationen möglich; ein erfolgreicher Refresh
//! überschreibt solche Änderungen danach vollständig (last writer wins).
//!
//! Ist die Quelle nicht erreichbar, bleibt bei einem Hintergrund-Refresh der
//! zwischengespeicherte Stand erhalten. Nur ein erzwungener Refresh (`reset`)
//! setzt dann auf die statischen Standarddaten zurück.

use crate::app::MarkerStore;
use crate::remote::{fallback_snapshot, fetch_snapshot, RemoteSource};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Store, geteilt zwischen Präsentationsschicht und Hintergrund-Refresh.
pub type SharedStore = Arc<Mutex<MarkerStore>>;

/// Ergebnis eines Refresh-Aufrufs. Keiner der Fälle ist ein Fehler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Letzter Abruf ist jünger als die Drosselungsdauer, nichts getan.
    Throttled,
    /// Ein anderer Refresh läuft bereits.
    AlreadyInFlight,
    /// Frischer Stand aus der Quelle übernommen.
    Refreshed,
    /// Quelle nicht verfügbar, zwischengespeicherter Stand bleibt erhalten.
    KeptCache,
    /// Quelle nicht verfügbar, statische Standarddaten übernommen (nur erzwungen).
    FellBack,
    /// Store-Mutex vergiftet, nichts getan.
    StoreUnavailable,
}

/// Führt einen Refresh zum aktuellen Zeitpunkt aus.
pub async fn refresh_from_source<S: RemoteSource>(
    store: &Mutex<MarkerStore>,
    source: &S,
    force: bool,
) -> RefreshOutcome {
    refresh_from_source_at(store, source, force, Utc::now()).await
}

/// Erzwingt einen Refresh. Ohne Quelle landet der Store bei den statischen Daten.
pub async fn reset<S: RemoteSource>(store: &Mutex<MarkerStore>, source: &S) -> RefreshOutcome {
    refresh_from_source(store, source, true).await
}

/// Refresh mit explizitem Zeitpunkt `now`.
pub async fn refresh_from_source_at<S: RemoteSource>(
    store: &Mutex<MarkerStore>,
    source: &S,
    force: bool,
    now: DateTime<Utc>,
) -> RefreshOutcome {
    let guard = {
        let Ok(locked) = store.lock() else {
            log::error!("Store-Lock fehlgeschlagen (Mutex vergiftet)");
            return RefreshOutcome::StoreUnavailable;
        };
        if !force && locked.is_cache_fresh(now) {
            log::debug!("Refresh übersprungen: Cache noch frisch");
            return RefreshOutcome::Throttled;
        }
        let Some(guard) = locked.try_begin_refresh() else {
            log::debug!("Refresh übersprungen: bereits aktiv");
            return RefreshOutcome::AlreadyInFlight;
        };
        guard
    };

    let fetched = fetch_snapshot(source).await;

    let Ok(mut locked) = store.lock() else {
        log::error!("Store-Lock fehlgeschlagen (Mutex vergiftet)");
        return RefreshOutcome::StoreUnavailable;
    };
    let outcome = match fetched {
        Ok(snapshot) => {
            locked.apply_source_snapshot(snapshot, Some(now));
            RefreshOutcome::Refreshed
        }
        Err(e) if force => {
            log::warn!("Remote-Quelle nicht verfügbar, verwende statische Daten: {}", e);
            locked.apply_source_snapshot(fallback_snapshot(), None);
            RefreshOutcome::FellBack
        }
        Err(e) => {
            log::warn!("Remote-Quelle nicht verfügbar, behalte gecachten Stand: {}", e);
            RefreshOutcome::KeptCache
        }
    };
    drop(locked);
    drop(guard);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarkerType, NewMarker};
    use crate::persistence::MemoryStore;
    use crate::remote::{default_map_config, fallback_markers, RemoteError};
    use crate::shared::EngineOptions;

    struct Unreachable;

    impl RemoteSource for Unreachable {
        async fn fetch_document(&self) -> Result<String, RemoteError> {
            Err(RemoteError::Status(503))
        }
    }

    fn shared() -> Mutex<MarkerStore> {
        Mutex::new(MarkerStore::with_state(
            Box::new(MemoryStore::new()),
            &EngineOptions::default(),
            Vec::new(),
            default_map_config(),
        ))
    }

    #[tokio::test]
    async fn background_refresh_keeps_cache_when_unreachable() {
        let store = shared();
        store
            .lock()
            .unwrap()
            .add(NewMarker::new("Local", MarkerType::Town, 1, 1));

        let outcome = refresh_from_source(&store, &Unreachable, false).await;

        assert_eq!(outcome, RefreshOutcome::KeptCache);
        let store = store.lock().unwrap();
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.markers()[0].name, "Local");
        assert!(store.can_undo());
        assert!(!store.is_loading());
        assert!(!store.is_cache_fresh(Utc::now()));
    }

    #[tokio::test]
    async fn forced_refresh_falls_back_to_static_data() {
        let store = shared();
        store
            .lock()
            .unwrap()
            .add(NewMarker::new("Local", MarkerType::Town, 1, 1));

        let outcome = reset(&store, &Unreachable).await;

        assert_eq!(outcome, RefreshOutcome::FellBack);
        let store = store.lock().unwrap();
        assert_eq!(store.markers(), fallback_markers().as_slice());
        assert!(!store.can_undo());
        assert!(!store.is_loading());
        assert!(!store.is_cache_fresh(Utc::now()));
    }

    #[tokio::test]
    async fn refresh_while_in_flight_is_rejected() {
        let store = shared();
        let guard = store.lock().unwrap().try_begin_refresh().expect("frei");

        let outcome = reset(&store, &Unreachable).await;
        assert_eq!(outcome, RefreshOutcome::AlreadyInFlight);
        assert!(store.lock().unwrap().markers().is_empty());

        drop(guard);
        assert_eq!(reset(&store, &Unreachable).await, RefreshOutcome::FellBack);
    }
}
