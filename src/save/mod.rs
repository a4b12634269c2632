//! Save-level utilities layered over the codec: single-field extraction,
//! upload metadata, the servers' better-save judgment, and .NET tick
//! conversions.

pub mod compare;
pub mod extract;
pub mod meta;
pub mod ticks;

pub use compare::{make_save_better_than, which_save_is_better, BetterSave};
pub use extract::extract_field;
pub use meta::{generate_upload_metadata, Platform, UploadMetadata, UploadOptions};
pub use ticks::{datetime_to_ticks, ticks_to_datetime};
