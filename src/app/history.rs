use std::sync::Arc;

/// Begrenzter Undo/Redo-Verlauf über unveränderliche Snapshots.
///
/// Die Einträge liegen als `Arc<T>` vor: Ein Snapshot ist O(1) teilbar,
/// Änderungen erzeugen immer einen neuen Eintrag statt den alten zu mutieren.
/// Der aktuelle Zustand ist stets `entries[current_index]`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<Arc<T>>,
    current_index: usize,
    max_history: usize,
}

impl<T> History<T> {
    /// Erstellt einen Verlauf mit `initial` als einzigem Eintrag.
    pub fn new(initial: T, max_history: usize) -> Self {
        Self {
            entries: vec![Arc::new(initial)],
            current_index: 0,
            max_history: max_history.max(1),
        }
    }

    /// Aktueller Zustand.
    pub fn current(&self) -> &T {
        &self.entries[self.current_index]
    }

    /// Aktueller Zustand als geteilter Snapshot.
    pub fn current_snapshot(&self) -> Arc<T> {
        Arc::clone(&self.entries[self.current_index])
    }

    /// Schreibt einen neuen Zustand.
    ///
    /// Verwirft den Redo-Zweig, hängt an und entfernt bei Überlauf den ältesten
    /// Eintrag. Der gerade geschriebene Zustand bleibt in jedem Fall aktuell.
    pub fn set_state(&mut self, state: T) {
        self.entries.truncate(self.current_index + 1);
        self.entries.push(Arc::new(state));
        self.current_index += 1;

        if self.entries.len() > self.max_history {
            self.entries.remove(0);
            self.current_index -= 1;
        }
    }

    /// Einen Schritt zurück. Gibt `false` zurück, wenn nichts zu tun war.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Einen Schritt vor. Gibt `false` zurück, wenn nichts zu tun war.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    /// Reduziert den Verlauf auf den aktuellen Zustand.
    pub fn clear_history(&mut self) {
        let current = self.current_snapshot();
        self.entries.clear();
        self.entries.push(current);
        self.current_index = 0;
    }

    /// Anzahl gehaltener Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ein Verlauf enthält immer mindestens den aktuellen Zustand.
    pub fn is_empty(&self) -> bool {
        false
    }
}
