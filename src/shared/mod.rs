//! Geteilte Konfiguration für alle Layer.

pub mod options;

pub use options::EngineOptions;
