//! Use-Cases für Marker-Operationen.

use crate::app::MarkerStore;
use crate::core::{is_valid_position, MarkerPatch, NewMarker};

/// Erzeugt eine ID, die in der aktuellen Liste noch nicht vorkommt.
fn fresh_id(store: &MarkerStore) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if store.find(&id).is_none() {
            return id;
        }
    }
}

/// Legt einen Marker an und gibt die vergebene ID zurück.
pub fn add_marker(store: &mut MarkerStore, marker: NewMarker) -> Option<String> {
    if marker.name.trim().is_empty() {
        log::warn!("Marker ohne Namen wird nicht angelegt");
        return None;
    }
    if !is_valid_position(marker.x, marker.y) {
        log::warn!(
            "Marker '{}' mit negativer Position ({}, {}) wird nicht angelegt",
            marker.name,
            marker.x,
            marker.y
        );
        return None;
    }

    let id = fresh_id(store);
    let mut markers = store.markers().to_vec();
    markers.push(marker.into_marker(id.clone()));
    store.commit_markers(markers);

    log::info!("Marker {} angelegt", id);
    Some(id)
}

/// Mergt die Felder eines Patches in den Marker mit der gegebenen ID.
///
/// `false`, wenn die ID unbekannt ist oder der Patch abgelehnt wird
/// (leerer Name, negative Position). In beiden Fällen bleibt alles unverändert.
pub fn update_marker(store: &mut MarkerStore, id: &str, patch: &MarkerPatch) -> bool {
    let Some(index) = store.markers().iter().position(|m| m.id == id) else {
        log::warn!("Marker {} existiert nicht", id);
        return false;
    };

    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        log::warn!("Leerer Name für Marker {} abgelehnt", id);
        return false;
    }

    let mut updated = store.markers()[index].clone();
    patch.apply_to(&mut updated);
    if !updated.has_valid_position() {
        log::warn!(
            "Negative Position ({}, {}) für Marker {} abgelehnt",
            updated.x,
            updated.y,
            id
        );
        return false;
    }
    if updated == store.markers()[index] {
        log::debug!("Marker {}: keine Änderung", id);
        return true;
    }

    let mut markers = store.markers().to_vec();
    markers[index] = updated;
    store.commit_markers(markers);

    log::info!("Marker {} aktualisiert", id);
    true
}

/// Entfernt den Marker mit der gegebenen ID.
pub fn delete_marker(store: &mut MarkerStore, id: &str) -> bool {
    if store.find(id).is_none() {
        log::debug!("Kein Marker {}", id);
        return false;
    }

    let markers = store
        .markers()
        .iter()
        .filter(|m| m.id != id)
        .cloned()
        .collect();
    store.commit_markers(markers);

    log::info!("Marker {} entfernt", id);
    true
}

/// Verschiebt einen Marker (Kurzform für ein Positions-Update).
pub fn move_marker(store: &mut MarkerStore, id: &str, x: i32, y: i32) -> bool {
    if is_valid_position(x, y) && !store.map_config().contains(x, y) {
        log::debug!("Marker {} liegt außerhalb des Bildes: ({}, {})", id, x, y);
    }
    update_marker(store, id, &MarkerPatch::position(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MarkerType;
    use crate::persistence::MemoryStore;
    use crate::remote::default_map_config;
    use crate::shared::EngineOptions;

    fn store() -> MarkerStore {
        MarkerStore::with_state(
            Box::new(MemoryStore::new()),
            &EngineOptions::default(),
            Vec::new(),
            default_map_config(),
        )
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut store = store();
        let a = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1)).unwrap();
        let b = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.markers().len(), 2);
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut store = store();
        assert!(add_marker(&mut store, NewMarker::new("  ", MarkerType::Town, 1, 1)).is_none());
        assert!(store.markers().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut store = store();
        add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1));
        let before = store.markers().to_vec();

        assert!(!update_marker(&mut store, "nope", &MarkerPatch::name("B")));
        assert!(!delete_marker(&mut store, "nope"));
        assert!(!move_marker(&mut store, "nope", 5, 5));
        assert_eq!(store.markers(), before.as_slice());
    }

    #[test]
    fn unchanged_update_does_not_create_history_entry() {
        let mut store = store();
        let id = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1)).unwrap();
        store.undo();
        store.redo();
        assert!(update_marker(&mut store, &id, &MarkerPatch::position(1, 1)));
        assert!(!store.can_redo());
        store.undo();
        assert!(store.markers().is_empty());
    }

    #[test]
    fn add_rejects_negative_position() {
        let mut store = store();
        assert!(add_marker(&mut store, NewMarker::new("Neg", MarkerType::Town, -50, -7)).is_none());
        assert!(add_marker(&mut store, NewMarker::new("Neg", MarkerType::Town, 5, -1)).is_none());
        assert!(store.markers().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn move_and_update_reject_negative_position() {
        let mut store = store();
        let id = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 10, 20)).unwrap();

        assert!(!move_marker(&mut store, &id, -10, -20));
        let patch = MarkerPatch {
            x: Some(-1),
            ..MarkerPatch::default()
        };
        assert!(!update_marker(&mut store, &id, &patch));

        let marker = store.find(&id).expect("vorhanden");
        assert_eq!((marker.x, marker.y), (10, 20));
        store.undo();
        assert!(store.markers().is_empty());
    }

    #[test]
    fn blank_name_update_is_rejected_without_change() {
        let mut store = store();
        let id = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1)).unwrap();

        assert!(!update_marker(&mut store, &id, &MarkerPatch::name("   ")));
        assert_eq!(store.find(&id).map(|m| m.name.as_str()), Some("A"));
        store.undo();
        assert!(!store.can_undo());
        assert!(store.markers().is_empty());
    }

    #[test]
    fn delete_removes_only_matching_marker() {
        let mut store = store();
        let a = add_marker(&mut store, NewMarker::new("A", MarkerType::Town, 1, 1)).unwrap();
        let b = add_marker(&mut store, NewMarker::new("B", MarkerType::City, 2, 2)).unwrap();
        assert!(delete_marker(&mut store, &a));
        assert_eq!(store.markers().len(), 1);
        assert_eq!(store.markers()[0].id, b);
    }
}
