//! Core-Domänentypen: Marker, Kartenkonfiguration, Koordinaten und Filter.

pub mod coords;
pub mod filter;
pub mod fuzzy;
pub mod map_config;
pub mod marker;

pub use coords::CoordinateTransform;
pub use filter::{apply_filters, count_by_type, display_order, visible_at_zoom, TypeFilters};
pub use fuzzy::FuzzyMatcher;
pub use map_config::{ConfigPatch, CurrentLocation, ExportConfig, MapConfig};
pub use marker::{
    is_valid_position, slugify, Marker, MarkerPatch, MarkerType, NewMarker, QuickFact,
};
