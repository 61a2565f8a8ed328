//! Filter-Pipeline: Typ-Sichtbarkeit, Fuzzy-Suche und Zoom-Schwellen.

use super::fuzzy::FuzzyMatcher;
use super::marker::{Marker, MarkerType};
use indexmap::IndexMap;

/// Sichtbarkeit pro Marker-Typ. Standard: alle sichtbar.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeFilters {
    visible: IndexMap<MarkerType, bool>,
}

impl Default for TypeFilters {
    fn default() -> Self {
        Self {
            visible: MarkerType::ALL.iter().map(|&t| (t, true)).collect(),
        }
    }
}

impl TypeFilters {
    /// Prüft, ob ein Typ sichtbar ist.
    pub fn is_visible(&self, marker_type: MarkerType) -> bool {
        self.visible.get(&marker_type).copied().unwrap_or(true)
    }

    /// Setzt die Sichtbarkeit eines Typs. Gibt `true` zurück, wenn sich etwas geändert hat.
    pub fn set(&mut self, marker_type: MarkerType, visible: bool) -> bool {
        self.visible.insert(marker_type, visible) != Some(visible)
    }

    /// Setzt alle Typen auf denselben Wert.
    pub fn set_all(&mut self, visible: bool) -> bool {
        let mut changed = false;
        for marker_type in MarkerType::ALL {
            changed |= self.set(marker_type, visible);
        }
        changed
    }

    /// Iteriert in Legenden-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerType, bool)> + '_ {
        self.visible.iter().map(|(&t, &v)| (t, v))
    }
}

/// Wendet Typ-Filter und (entprellte) Suche auf die kanonische Liste an.
///
/// Suchbegriffe unterhalb der Mindestlänge lassen die typgefilterte Liste
/// in Originalreihenfolge durch. Sonst wird nach Relevanz sortiert.
pub fn apply_filters(
    markers: &[Marker],
    types: &TypeFilters,
    query: &str,
    matcher: &FuzzyMatcher,
) -> Vec<Marker> {
    let type_filtered = markers.iter().filter(|m| types.is_visible(m.marker_type));

    let query = query.trim();
    if query.chars().count() < matcher.min_match_len() {
        return type_filtered.cloned().collect();
    }

    let mut scored: Vec<(f64, &Marker)> = type_filtered
        .filter_map(|marker| best_score(marker, query, matcher).map(|s| (s, marker)))
        .collect();
    // sort_by ist stabil: gleiche Scores behalten die Originalreihenfolge
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, m)| m.clone()).collect()
}

fn best_score(marker: &Marker, query: &str, matcher: &FuzzyMatcher) -> Option<f64> {
    let name = matcher.score(query, &marker.name);
    let description = marker
        .description
        .as_deref()
        .and_then(|d| matcher.score(query, d));
    match (name, description) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Zoom-Stufe: lässt nur Typen durch, deren Mindest-Zoom erreicht ist.
pub fn visible_at_zoom(markers: &[Marker], zoom: f64) -> Vec<&Marker> {
    markers
        .iter()
        .filter(|m| m.marker_type.is_visible_at_zoom(zoom))
        .collect()
}

/// Abgeleitete Anzeige-Reihenfolge: Typ-Rang, dann Name (case-insensitiv).
pub fn display_order(markers: &[Marker]) -> Vec<&Marker> {
    let mut ordered: Vec<&Marker> = markers.iter().collect();
    ordered.sort_by_cached_key(|m| (m.marker_type.display_rank(), m.name.to_lowercase()));
    ordered
}

/// Anzahl Marker pro Typ (für die Legende), alle Typen enthalten.
pub fn count_by_type(markers: &[Marker]) -> IndexMap<MarkerType, usize> {
    let mut counts: IndexMap<MarkerType, usize> =
        MarkerType::ALL.iter().map(|&t| (t, 0)).collect();
    for marker in markers {
        *counts.entry(marker.marker_type).or_insert(0) += 1;
    }
    counts
}
