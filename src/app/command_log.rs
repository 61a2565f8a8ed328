//! Protokoll der an den Store gerichteten Commands.
//!
//! Neben dem Command selbst wird festgehalten, ob der Store ihn übernommen
//! hat. Abgelehnte Commands (unbekannte ID, leerer Name, negative Position,
//! ungültiger Import) bleiben so für Diagnose und Tests sichtbar.

use super::StoreCommand;

/// Ein protokollierter Command samt Ergebnis.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedCommand {
    pub command: StoreCommand,
    /// `true`, wenn der Store den Command übernommen hat
    pub applied: bool,
}

/// Begrenztes Protokoll, älteste Hälfte wird bei Überlauf verworfen.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<LoggedCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Hält einen ausgeführten Command fest.
    pub fn record(&mut self, command: StoreCommand, applied: bool) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        if !applied {
            log::debug!("Command ohne Wirkung: {:?}", command);
        }
        self.entries.push(LoggedCommand { command, applied });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LoggedCommand] {
        &self.entries
    }

    /// Zuletzt protokollierter Command.
    pub fn last(&self) -> Option<&LoggedCommand> {
        self.entries.last()
    }

    /// Commands, die der Store abgelehnt hat oder die nichts geändert haben.
    pub fn rejected(&self) -> impl Iterator<Item = &StoreCommand> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.applied)
            .map(|entry| &entry.command)
    }
}
