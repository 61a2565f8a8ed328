//! Zustandslose Codecs an der Systemgrenze: Share-Links und Import/Export.

pub mod share;
pub mod snapshot;

pub use share::{decode as decode_share_link, encode as encode_share_link, ShareView};
pub use snapshot::{export_document, parse_import, ImportError, ImportPayload, SnapshotDocument};
