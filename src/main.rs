//! Atlas Marker Editor (headless).
//!
//! Kommandozeilen-Treiber für die Marker-Engine: Refresh gegen die
//! Remote-Quelle, Import/Export von Snapshots und Share-Links.

use anyhow::Context;
use atlas_marker_editor::{
    encode_share_link, reset, EngineOptions, FileStore, HttpRemoteSource, KeyValueStore,
    MarkerStore, MemoryStore, RefreshOutcome, SharedStore, ShareView,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    AppRunner::run().await
}

/// Vom Benutzer gewählte Aktion.
enum Action {
    Sync,
    Export(PathBuf),
    Import(PathBuf),
    Share(String),
}

impl Action {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let action = match args.next().as_deref() {
            None | Some("sync") => Action::Sync,
            Some("export") => Action::Export(args.next().context("export <pfad> erwartet")?.into()),
            Some("import") => Action::Import(args.next().context("import <pfad> erwartet")?.into()),
            Some("share") => Action::Share(args.next().context("share <basis-url> erwartet")?),
            Some(other) => anyhow::bail!(
                "Unbekannte Aktion '{}'. Verwendung: atlas-marker-editor [sync|export <pfad>|import <pfad>|share <basis-url>]",
                other
            ),
        };
        Ok(action)
    }
}

struct AppRunner;

impl AppRunner {
    async fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "Atlas Marker Editor v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let action = Action::parse(std::env::args().skip(1))?;

        // Optionen aus TOML laden (oder Standardwerte)
        let options = EngineOptions::load_from_file(&EngineOptions::config_path());
        let store: SharedStore = Arc::new(Mutex::new(MarkerStore::open(
            Self::open_storage(&options),
            &options,
        )));

        match action {
            Action::Sync => {
                let source = HttpRemoteSource::from_options(&options)?;
                log::info!("Sync gegen {}", source.url());
                match reset(&store, &source).await {
                    RefreshOutcome::Refreshed => log::info!("Sync abgeschlossen"),
                    RefreshOutcome::FellBack => {
                        log::warn!("Quelle nicht erreichbar, statische Daten übernommen")
                    }
                    other => log::warn!("Sync nicht ausgeführt: {:?}", other),
                }
                Self::print_summary(&store)
            }
            Action::Export(path) => {
                let document = Self::lock(&store)?.export_snapshot();
                std::fs::write(&path, document)
                    .with_context(|| format!("Export nach {} fehlgeschlagen", path.display()))?;
                log::info!("Export geschrieben: {}", path.display());
                Ok(())
            }
            Action::Import(path) => {
                let document = std::fs::read_to_string(&path)
                    .with_context(|| format!("{} nicht lesbar", path.display()))?;
                Self::lock(&store)?.import_snapshot(&document)?;
                Self::print_summary(&store)
            }
            Action::Share(base) => {
                let base = reqwest::Url::parse(&base)
                    .with_context(|| format!("Ungültige Basis-URL: {}", base))?;
                let view = ShareView::start_of(Self::lock(&store)?.map_config());
                let link = encode_share_link(&base, &view);
                println!("{}", link);
                Ok(())
            }
        }
    }

    /// Öffnet den Datei-Cache; ohne beschreibbares Verzeichnis läuft die Engine flüchtig.
    fn open_storage(options: &EngineOptions) -> Box<dyn KeyValueStore> {
        match FileStore::open(&options.cache_dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("Cache nicht verfügbar, arbeite ohne Persistenz: {:#}", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    fn lock(store: &SharedStore) -> anyhow::Result<std::sync::MutexGuard<'_, MarkerStore>> {
        store
            .lock()
            .map_err(|_| anyhow::anyhow!("Store-Lock fehlgeschlagen (Mutex vergiftet)"))
    }

    fn print_summary(store: &SharedStore) -> anyhow::Result<()> {
        let store = Self::lock(store)?;
        let (south_west, north_east) = store.map_config().display_bounds();
        println!(
            "{} Marker, Kartengrenzen ({}, {}) - ({}, {})",
            store.markers().len(),
            south_west.x,
            south_west.y,
            north_east.x,
            north_east.y
        );
        for (marker_type, count) in store.type_counts() {
            println!("  {:<10} {}", marker_type.label(), count);
        }
        for marker in store.display_order() {
            println!(
                "  [{}] {} ({}, {}) -> {}",
                marker.marker_type.label(),
                marker.name,
                marker.x,
                marker.y,
                store.map_config().reference_url(marker)
            );
        }
        Ok(())
    }
}
