//! Atlas Marker Editor Library.
//! Zustands- und Synchronisations-Engine für Karten-Marker, als Library
//! exportiert für Präsentationsschichten, Tests und Benchmarks.

pub mod app;
pub mod codec;
pub mod core;
pub mod persistence;
pub mod remote;
pub mod shared;

pub use app::{
    refresh_from_source, reset, MarkerController, MarkerStore, RefreshOutcome, SharedStore,
    StoreCommand,
};
pub use codec::{
    decode_share_link, encode_share_link, export_document, parse_import, ImportError, ShareView,
};
pub use core::{
    ConfigPatch, CoordinateTransform, CurrentLocation, MapConfig, Marker, MarkerPatch, MarkerType,
    NewMarker, QuickFact,
};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use remote::{HttpRemoteSource, RemoteError, RemoteSource};
pub use shared::EngineOptions;
