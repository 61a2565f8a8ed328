//! Controller für die zentrale Command-Verarbeitung.

use super::{CommandLog, MarkerStore, StoreCommand};
use std::time::Instant;

/// Dispatcht Commands der Präsentationsschicht an den Marker-Store.
#[derive(Debug, Default)]
pub struct MarkerController {
    command_log: CommandLog,
}

impl MarkerController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bisher ausgeführte Commands.
    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    /// Führt einen Command zum aktuellen Zeitpunkt aus.
    pub fn handle_command(
        &mut self,
        store: &mut MarkerStore,
        command: StoreCommand,
    ) -> anyhow::Result<()> {
        self.handle_command_at(store, command, Instant::now())
    }

    /// Führt einen Command aus; `now` steuert die Such-Entprellung.
    ///
    /// Auch fehlgeschlagene Commands werden protokolliert.
    pub fn handle_command_at(
        &mut self,
        store: &mut MarkerStore,
        command: StoreCommand,
        now: Instant,
    ) -> anyhow::Result<()> {
        let result = Self::dispatch(store, &command, now);
        self.command_log.record(command, matches!(result, Ok(true)));
        result.map(|_| ())
    }

    /// Gibt zurück, ob der Store den Command übernommen hat.
    fn dispatch(
        store: &mut MarkerStore,
        command: &StoreCommand,
        now: Instant,
    ) -> anyhow::Result<bool> {
        let applied = match command {
            // === Marker ===
            StoreCommand::AddMarker { marker } => store.add(marker.clone()).is_some(),
            StoreCommand::UpdateMarker { id, patch } => store.update(id, patch),
            StoreCommand::DeleteMarker { id } => store.delete(id),
            StoreCommand::MoveMarker { id, x, y } => store.move_marker(id, *x, *y),
            StoreCommand::DropMarkerAtDisplay { id, position } => {
                store.move_marker_to_display(id, *position)
            }

            // === History ===
            StoreCommand::Undo => store.undo(),
            StoreCommand::Redo => store.redo(),

            // === Import ===
            StoreCommand::ImportSnapshot { document } => {
                store.import_snapshot(document)?;
                true
            }

            // === Filter ===
            StoreCommand::SetSearchInput { query } => {
                store.set_search_input(query.as_str(), now);
                true
            }
            StoreCommand::CommitSearch => store.flush_search(),
            StoreCommand::SetTypeVisible {
                marker_type,
                visible,
            } => store.set_type_visible(*marker_type, *visible),
            StoreCommand::SetAllTypesVisible { visible } => store.set_all_types_visible(*visible),
        };
        Ok(applied)
    }

    /// Timer-Tick der Präsentationsschicht: übernimmt entprellte Sucheingaben.
    ///
    /// Gibt `true` zurück, wenn sich die gefilterte Liste geändert hat.
    pub fn tick(&mut self, store: &mut MarkerStore, now: Instant) -> bool {
        store.poll_search(now)
    }
}
