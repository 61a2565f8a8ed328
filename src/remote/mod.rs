//! Remote-Quelle: Abruf des veröffentlichten Dokuments und Extraktion des Datenblocks.
//!
//! Jeder Fehler auf diesem Weg endet beim Aufrufer im zwischengespeicherten
//! Stand oder im statischen Fallback, `RemoteError` verlässt die Engine nie.

mod fallback;
mod http;
mod payload;

pub use fallback::{default_map_config, fallback_markers, fallback_snapshot};
pub use http::HttpRemoteSource;
pub use payload::extract_payload;

use crate::core::{MapConfig, Marker};
use std::future::Future;
use thiserror::Error;

/// Fehler beim Abrufen oder Auswerten der Remote-Quelle.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Netzwerk- oder Protokollfehler.
    #[error("HTTP-Abruf fehlgeschlagen: {0}")]
    Http(#[from] reqwest::Error),
    /// Antwort ohne 2xx-Status.
    #[error("Quelle antwortet mit Status {0}")]
    Status(u16),
    /// Kein ```json-Block im Dokument gefunden.
    #[error("Kein Datenblock im Dokument")]
    MissingDataBlock,
    /// Datenblock gefunden, aber nicht im erwarteten Format.
    #[error("Datenblock ungültig: {0}")]
    InvalidPayload(String),
}

/// Frischer Stand aus der Quelle (oder dem Fallback).
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSnapshot {
    pub markers: Vec<Marker>,
    pub config: MapConfig,
}

/// Liefert das Roh-Dokument der Quelle.
pub trait RemoteSource: Sync {
    /// Ruft das Dokument ab. Nur die Transportebene, keine Auswertung.
    fn fetch_document(&self) -> impl Future<Output = Result<String, RemoteError>> + Send;
}

/// Ruft ab und extrahiert den Datenblock.
///
/// Erfolg wird hier geloggt; über den Fallback entscheidet der Aufrufer.
pub async fn fetch_snapshot<S: RemoteSource>(source: &S) -> Result<SourceSnapshot, RemoteError> {
    let document = source.fetch_document().await?;
    let snapshot = extract_payload(&document)?;
    log::info!(
        "Remote-Quelle geladen: {} Marker, Bild {}x{}",
        snapshot.markers.len(),
        snapshot.config.image_width,
        snapshot.config.image_height
    );
    Ok(snapshot)
}
