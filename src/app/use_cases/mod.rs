//! Use-Cases der Application-Layer-Orchestrierung.

pub mod markers;
pub mod refresh;
pub mod snapshot_io;
