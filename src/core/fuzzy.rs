//! Approximative Textsuche über Marker-Namen und -Beschreibungen.
//!
//! Bewertet das Muster gegen den besten Teilstring des Textes
//! (Edit-Distanz mit freiem Start/Ende). Die Position des Treffers
//! spielt keine Rolle. Score 0.0 = exakter Treffer, 1.0 = nichts passt.

use crate::shared::EngineOptions;

/// Fuzzy-Matcher mit Schwelle und Mindestlänge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
    min_match_len: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::from_options(&EngineOptions::default())
    }
}

impl FuzzyMatcher {
    /// Erstellt einen Matcher mit expliziter Schwelle.
    pub fn new(threshold: f64, min_match_len: usize) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            min_match_len: min_match_len.max(1),
        }
    }

    /// Übernimmt Schwelle und Mindestlänge aus den Engine-Optionen.
    pub fn from_options(options: &EngineOptions) -> Self {
        Self::new(options.fuzzy_threshold, options.fuzzy_min_match_len)
    }

    /// Minimale Länge eines Suchbegriffs.
    pub fn min_match_len(&self) -> usize {
        self.min_match_len
    }

    /// Score des Musters gegen den Text, `None` wenn die Schwelle überschritten ist.
    pub fn score(&self, pattern: &str, text: &str) -> Option<f64> {
        let pattern: Vec<char> = pattern.trim().to_lowercase().chars().collect();
        if pattern.len() < self.min_match_len {
            return None;
        }
        let text: Vec<char> = text.to_lowercase().chars().collect();

        let errors = best_substring_distance(&pattern, &text);
        let score = errors as f64 / pattern.len() as f64;
        (score <= self.threshold).then_some(score)
    }
}

/// Kleinste Edit-Distanz des Musters zu irgendeinem Teilstring des Textes.
fn best_substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    // Spalte für leeren Text-Präfix: i Löschungen
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];
    let mut best = m;

    for &tc in text {
        // Treffer darf an jeder Textposition beginnen
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            let insertion = prev[i] + 1;
            let deletion = cur[i - 1] + 1;
            cur[i] = substitution.min(insertion).min(deletion);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}
