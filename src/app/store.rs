//! Marker-Store — zentrale, einzige Datenhaltung der Engine.
//!
//! Die kanonische Markerliste ist immer der aktuelle History-Eintrag.
//! Jede Änderung daran wird in den Cache geschrieben und aktualisiert
//! die gefilterte Liste. Lesezugriffe liefern nur unveränderliche Sichten.

use super::history::History;
use super::search::SearchDebouncer;
use super::use_cases;
use crate::codec::ImportError;
use crate::core::{
    apply_filters, count_by_type, display_order, visible_at_zoom, FuzzyMatcher, MapConfig, Marker,
    MarkerPatch, MarkerType, NewMarker, TypeFilters,
};
use crate::persistence::{self, KeyValueStore};
use crate::remote::{default_map_config, fallback_markers, SourceSnapshot};
use crate::shared::EngineOptions;
use chrono::{DateTime, Utc};
use glam::DVec2;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Hält das Lade-Flag, solange ein Refresh läuft. Gibt es beim Drop frei.
#[derive(Debug)]
pub struct RefreshGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Besitzt Markerliste, Kartenkonfiguration, Verlauf und Filterzustand.
pub struct MarkerStore {
    history: History<Vec<Marker>>,
    config: MapConfig,
    type_filters: TypeFilters,
    search: SearchDebouncer,
    matcher: FuzzyMatcher,
    filtered: Vec<Marker>,
    storage: Box<dyn KeyValueStore>,
    loading: Arc<AtomicBool>,
    cache_duration: chrono::Duration,
}

impl MarkerStore {
    /// Öffnet den Store mit dem Stand aus dem Cache.
    ///
    /// Fehlende Slots werden durch die statischen Standarddaten ersetzt, sodass
    /// ohne Netzwerk sofort ein darstellbarer Zustand vorliegt.
    pub fn open(storage: Box<dyn KeyValueStore>, options: &EngineOptions) -> Self {
        let markers = persistence::read_markers(storage.as_ref()).unwrap_or_else(|| {
            log::info!("Keine gecachten Marker, verwende statische Daten");
            fallback_markers()
        });
        let config = persistence::read_config(storage.as_ref()).unwrap_or_else(|| {
            log::info!("Keine gecachte Kartenkonfiguration, verwende Standardwerte");
            default_map_config()
        });
        log::info!("Store geöffnet: {} Marker", markers.len());
        Self::with_state(storage, options, markers, config)
    }

    /// Erstellt den Store mit explizitem Anfangszustand (ohne Cache-Lesezugriff).
    pub fn with_state(
        storage: Box<dyn KeyValueStore>,
        options: &EngineOptions,
        markers: Vec<Marker>,
        config: MapConfig,
    ) -> Self {
        let mut store = Self {
            history: History::new(markers, options.max_history),
            config,
            type_filters: TypeFilters::default(),
            search: SearchDebouncer::new(options.search_debounce()),
            matcher: FuzzyMatcher::from_options(options),
            filtered: Vec::new(),
            storage,
            loading: Arc::new(AtomicBool::new(false)),
            cache_duration: options.cache_duration(),
        };
        store.recompute_filtered();
        store
    }

    // ── Lesezugriffe ────────────────────────────────────────────────

    /// Kanonische Markerliste.
    pub fn markers(&self) -> &[Marker] {
        self.history.current()
    }

    /// Typ- und suchgefilterte Liste (vor der Zoom-Stufe).
    pub fn filtered_markers(&self) -> &[Marker] {
        &self.filtered
    }

    /// Aktuelle Kartenkonfiguration.
    pub fn map_config(&self) -> &MapConfig {
        &self.config
    }

    /// Sichtbarkeit pro Typ.
    pub fn type_filters(&self) -> &TypeFilters {
        &self.type_filters
    }

    /// Wirksamer (entprellter) Suchbegriff.
    pub fn search_query(&self) -> &str {
        self.search.applied()
    }

    /// Zuletzt eingegebener Suchtext.
    pub fn search_input(&self) -> &str {
        self.search.raw()
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// `true`, solange ein Refresh läuft.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Sucht einen Marker per ID.
    pub fn find(&self, id: &str) -> Option<&Marker> {
        self.markers().iter().find(|m| m.id == id)
    }

    /// Gefilterte Marker, die beim gegebenen Zoom sichtbar sind.
    pub fn visible_at_zoom(&self, zoom: f64) -> Vec<&Marker> {
        visible_at_zoom(&self.filtered, zoom)
    }

    /// Kanonische Liste in abgeleiteter Anzeige-Reihenfolge.
    pub fn display_order(&self) -> Vec<&Marker> {
        display_order(self.markers())
    }

    /// Anzahl Marker pro Typ.
    pub fn type_counts(&self) -> IndexMap<MarkerType, usize> {
        count_by_type(self.markers())
    }

    /// Zugriff auf den Cache (z.B. für Diagnose).
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    // ── Marker-Operationen ──────────────────────────────────────────

    /// Legt einen Marker an und gibt die neue ID zurück.
    ///
    /// `None` bei leerem Namen oder negativer Position.
    pub fn add(&mut self, marker: NewMarker) -> Option<String> {
        use_cases::markers::add_marker(self, marker)
    }

    /// Mergt Felder in einen Marker.
    ///
    /// `false`, wenn die ID unbekannt ist oder die Änderung abgelehnt wird
    /// (leerer Name, negative Position). Der Zustand bleibt dann unverändert.
    pub fn update(&mut self, id: &str, patch: &MarkerPatch) -> bool {
        use_cases::markers::update_marker(self, id, patch)
    }

    /// Entfernt einen Marker. `false` wenn die ID unbekannt ist.
    pub fn delete(&mut self, id: &str) -> bool {
        use_cases::markers::delete_marker(self, id)
    }

    /// Verschiebt einen Marker auf eine Pixel-Position. `false` wie bei [`Self::update`].
    pub fn move_marker(&mut self, id: &str, x: i32, y: i32) -> bool {
        use_cases::markers::move_marker(self, id, x, y)
    }

    /// Verschiebt einen Marker auf eine Position im Anzeigeraum (z.B. nach Drag).
    pub fn move_marker_to_display(&mut self, id: &str, position: DVec2) -> bool {
        let (x, y) = self.config.transform().from_display(position);
        use_cases::markers::move_marker(self, id, x, y)
    }

    /// Einen Schritt zurück.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            log::debug!("Undo: nichts zu tun");
            return false;
        }
        self.after_markers_changed();
        log::info!("Undo ausgeführt");
        true
    }

    /// Einen Schritt vor.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            log::debug!("Redo: nichts zu tun");
            return false;
        }
        self.after_markers_changed();
        log::info!("Redo ausgeführt");
        true
    }

    /// Export-Dokument des aktuellen Stands.
    pub fn export_snapshot(&self) -> String {
        use_cases::snapshot_io::export_snapshot(self)
    }

    /// Ersetzt den Stand durch ein Import-Dokument. Bei Fehler bleibt alles unverändert.
    pub fn import_snapshot(&mut self, document: &str) -> Result<(), ImportError> {
        use_cases::snapshot_io::import_snapshot(self, document)
    }

    // ── Filter ──────────────────────────────────────────────────────

    /// Registriert eine Sucheingabe. Wirksam erst nach der Ruhezeit (`poll_search`).
    pub fn set_search_input(&mut self, query: impl Into<String>, now: Instant) {
        self.search.input(query, now);
    }

    /// Übernimmt eine wartende Sucheingabe nach Ablauf der Ruhezeit.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        let changed = self.search.poll(now);
        if changed {
            self.recompute_filtered();
        }
        changed
    }

    /// Übernimmt eine wartende Sucheingabe sofort.
    pub fn flush_search(&mut self) -> bool {
        let changed = self.search.flush();
        if changed {
            self.recompute_filtered();
        }
        changed
    }

    /// Blendet einen Typ ein oder aus. `true`, wenn sich der Filter geändert hat.
    pub fn set_type_visible(&mut self, marker_type: MarkerType, visible: bool) -> bool {
        let changed = self.type_filters.set(marker_type, visible);
        if changed {
            self.recompute_filtered();
        }
        changed
    }

    /// Blendet alle Typen ein oder aus. `true`, wenn sich ein Filter geändert hat.
    pub fn set_all_types_visible(&mut self, visible: bool) -> bool {
        let changed = self.type_filters.set_all(visible);
        if changed {
            self.recompute_filtered();
        }
        changed
    }

    // ── Refresh-Protokoll ───────────────────────────────────────────

    /// Prüft, ob der letzte erfolgreiche Abruf jünger als die Drosselungsdauer ist.
    pub fn is_cache_fresh(&self, now: DateTime<Utc>) -> bool {
        persistence::read_last_fetch(self.storage.as_ref())
            .is_some_and(|last| now - last < self.cache_duration)
    }

    /// Setzt das Lade-Flag, falls noch kein Refresh läuft.
    pub fn try_begin_refresh(&self) -> Option<RefreshGuard> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshGuard {
                flag: Arc::clone(&self.loading),
            })
    }

    /// Übernimmt einen frischen Stand aus Quelle oder Fallback.
    ///
    /// Überschreibt lokale Änderungen vollständig und leert den Verlauf.
    /// `fetched_at` wird nur bei echtem Remote-Erfolg gesetzt.
    pub fn apply_source_snapshot(
        &mut self,
        snapshot: SourceSnapshot,
        fetched_at: Option<DateTime<Utc>>,
    ) {
        self.replace_all(snapshot.markers, Some(snapshot.config));
        if let Some(at) = fetched_at {
            persistence::write_last_fetch(self.storage.as_mut(), at);
        }
    }

    // ── Interne Mutationen ──────────────────────────────────────────

    /// Schreibt eine neue Markerliste als History-Eintrag.
    pub(crate) fn commit_markers(&mut self, markers: Vec<Marker>) {
        self.history.set_state(markers);
        self.after_markers_changed();
    }

    /// Ersetzt Liste (und optional Config) als einzigen, nicht rückgängig machbaren Eintrag.
    pub(crate) fn replace_all(&mut self, markers: Vec<Marker>, config: Option<MapConfig>) {
        self.history.set_state(markers);
        self.history.clear_history();
        if let Some(config) = config {
            self.config = config;
            persistence::write_config(self.storage.as_mut(), &self.config);
        }
        self.after_markers_changed();
    }

    fn after_markers_changed(&mut self) {
        persistence::write_markers(self.storage.as_mut(), self.history.current());
        self.recompute_filtered();
    }

    fn recompute_filtered(&mut self) {
        self.filtered = apply_filters(
            self.history.current(),
            &self.type_filters,
            self.search.applied(),
            &self.matcher,
        );
    }
}
