//! Entprellte Sucheingabe.
//!
//! Übernimmt den zuletzt eingegebenen Suchbegriff erst nach einer Ruhezeit.
//! Der Aufrufer liefert die Zeit (`Instant`) und pollt z.B. pro Frame oder Timer-Tick.

use std::time::{Duration, Instant};

/// Zustandsautomat für die Such-Entprellung.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
    applied: String,
}

impl SearchDebouncer {
    /// Erstellt einen Debouncer mit gegebener Ruhezeit.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            applied: String::new(),
        }
    }

    /// Registriert eine neue Eingabe und startet die Ruhezeit neu.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// Übernimmt die wartende Eingabe, wenn die Ruhezeit verstrichen ist.
    ///
    /// Gibt `true` zurück, wenn sich der übernommene Suchbegriff geändert hat.
    pub fn poll(&mut self, now: Instant) -> bool {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quiet_period);
        if ready { self.flush() } else { false }
    }

    /// Übernimmt die wartende Eingabe sofort (z.B. bei Enter).
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((query, _)) if query != self.applied => {
                self.applied = query;
                true
            }
            _ => false,
        }
    }

    /// Aktuell wirksamer Suchbegriff.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// Zuletzt eingegebener Text (wartend oder bereits übernommen).
    pub fn raw(&self) -> &str {
        self.pending
            .as_ref()
            .map_or(self.applied.as_str(), |(q, _)| q.as_str())
    }

    /// Prüft, ob eine Eingabe auf Übernahme wartet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(150);

    #[test]
    fn applies_only_after_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);
        debouncer.input("tre", t0);

        assert!(!debouncer.poll(t0 + Duration::from_millis(100)));
        assert_eq!(debouncer.applied(), "");
        assert_eq!(debouncer.raw(), "tre");

        assert!(debouncer.poll(t0 + Duration::from_millis(150)));
        assert_eq!(debouncer.applied(), "tre");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn new_input_restarts_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);
        debouncer.input("t", t0);
        debouncer.input("tr", t0 + Duration::from_millis(100));
        debouncer.input("tres", t0 + Duration::from_millis(200));

        assert!(!debouncer.poll(t0 + Duration::from_millis(300)));
        assert!(debouncer.poll(t0 + Duration::from_millis(350)));
        assert_eq!(debouncer.applied(), "tres");
    }

    #[test]
    fn unchanged_query_reports_no_change() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(QUIET);
        debouncer.input("mill", t0);
        assert!(debouncer.flush());
        debouncer.input("mill", t0);
        assert!(!debouncer.poll(t0 + QUIET));
        assert!(!debouncer.is_pending());
    }
}
