//! Zentrale Konfiguration für die Marker-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Remote-Quelle ───────────────────────────────────────────────────

/// URL des veröffentlichten Quell-Dokuments (enthält einen ```json-Block).
pub const SOURCE_URL: &str = "https://docs.google.com/document/d/e/atlas-markers/pub?embedded=true";
/// Mindestabstand zwischen zwei Hintergrund-Refreshes (Sekunden).
pub const CACHE_DURATION_SECS: u64 = 5 * 60;
/// Timeout für den HTTP-Abruf (Sekunden).
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl gehaltener History-Einträge.
pub const MAX_HISTORY: usize = 50;

// ── Suche ───────────────────────────────────────────────────────────

/// Ruhezeit, nach der eine Sucheingabe übernommen wird (Millisekunden).
pub const SEARCH_DEBOUNCE_MS: u64 = 150;
/// Fuzzy-Schwelle (0.0 = exakt, 1.0 = alles passt).
pub const FUZZY_THRESHOLD: f64 = 0.4;
/// Minimale Länge eines Suchbegriffs bzw. Match-Fragments.
pub const FUZZY_MIN_MATCH_LEN: usize = 2;

// ── Zoom-Sichtbarkeit ───────────────────────────────────────────────

/// Standard-Zoom der Kartenansicht.
pub const DEFAULT_ZOOM: f64 = 0.0;
/// Ab diesem Zoom werden Regionen angezeigt.
pub const REGION_MIN_ZOOM: f64 = -2.0;
/// Ab diesem Zoom werden Städte angezeigt.
pub const CITY_MIN_ZOOM: f64 = -1.0;
/// Ab diesem Zoom werden Orte und Dörfer angezeigt (hineingezoomt über Standard).
pub const DETAIL_MIN_ZOOM: f64 = 1.0;

// ── Share-Links ─────────────────────────────────────────────────────

/// Größte zulässige Pixel-Koordinate in einem Share-Link.
pub const SHARE_COORD_MAX: f64 = 20_000.0;
/// Kleinster zulässiger Zoom in einem Share-Link.
pub const SHARE_ZOOM_MIN: f64 = -5.0;
/// Größter zulässiger Zoom in einem Share-Link.
pub const SHARE_ZOOM_MAX: f64 = 5.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `atlas_marker_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineOptions {
    // ── Remote ──────────────────────────────────────────────────
    /// URL des veröffentlichten Quell-Dokuments
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Verzeichnis für den lokalen Key/Value-Cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Drosselung des Hintergrund-Refreshs in Sekunden
    #[serde(default = "default_cache_duration_secs")]
    pub cache_duration_secs: u64,
    /// HTTP-Timeout in Sekunden
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe (inkl. aktuellem Zustand)
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    // ── Suche ───────────────────────────────────────────────────
    /// Debounce-Ruhezeit der Suche in Millisekunden
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Fuzzy-Schwelle (0.0 = exakt, 1.0 = alles)
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Minimale Match-Länge
    #[serde(default = "default_fuzzy_min_match_len")]
    pub fuzzy_min_match_len: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            cache_dir: default_cache_dir(),
            cache_duration_secs: CACHE_DURATION_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,

            max_history: MAX_HISTORY,

            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            fuzzy_threshold: FUZZY_THRESHOLD,
            fuzzy_min_match_len: FUZZY_MIN_MATCH_LEN,
        }
    }
}

fn default_source_url() -> String {
    SOURCE_URL.to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".atlas_cache")
}

fn default_cache_duration_secs() -> u64 {
    CACHE_DURATION_SECS
}

fn default_request_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_max_history() -> usize {
    MAX_HISTORY
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

fn default_fuzzy_threshold() -> f64 {
    FUZZY_THRESHOLD
}

fn default_fuzzy_min_match_len() -> usize {
    FUZZY_MIN_MATCH_LEN
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("atlas_marker_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("atlas_marker_editor.toml")
    }

    /// Drosselungsdauer als `chrono::Duration`.
    pub fn cache_duration(&self) -> chrono::Duration {
        i64::try_from(self.cache_duration_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Debounce-Ruhezeit der Suche.
    pub fn search_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
    }

    /// HTTP-Timeout.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
