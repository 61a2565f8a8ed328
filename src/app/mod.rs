//! Application-Layer: Store, Verlauf, Commands und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod history;
pub mod search;
pub mod store;
pub mod use_cases;

pub use command_log::{CommandLog, LoggedCommand};
pub use controller::MarkerController;
pub use events::StoreCommand;
pub use history::History;
pub use search::SearchDebouncer;
pub use store::{MarkerStore, RefreshGuard};
pub use use_cases::refresh::{
    refresh_from_source, refresh_from_source_at, reset, RefreshOutcome, SharedStore,
};
