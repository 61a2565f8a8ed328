//! Commands der Präsentationsschicht an den Marker-Store.

use crate::core::{MarkerPatch, MarkerType, NewMarker};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Neuen Marker anlegen
    AddMarker { marker: NewMarker },
    /// Felder eines Markers ändern
    UpdateMarker { id: String, patch: MarkerPatch },
    /// Marker löschen
    DeleteMarker { id: String },
    /// Marker auf Pixel-Position verschieben
    MoveMarker { id: String, x: i32, y: i32 },
    /// Marker nach Drag auf eine Anzeige-Position verschieben
    DropMarkerAtDisplay { id: String, position: glam::DVec2 },
    /// Letzte Änderung rückgängig machen
    Undo,
    /// Rückgängig gemachte Änderung wiederherstellen
    Redo,
    /// Import-Dokument übernehmen
    ImportSnapshot { document: String },
    /// Sucheingabe (wird entprellt übernommen)
    SetSearchInput { query: String },
    /// Sucheingabe sofort übernehmen (z.B. Enter)
    CommitSearch,
    /// Typ ein-/ausblenden
    SetTypeVisible { marker_type: MarkerType, visible: bool },
    /// Alle Typen ein-/ausblenden
    SetAllTypesVisible { visible: bool },
}
