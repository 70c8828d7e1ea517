#![forbid(unsafe_code)]

//! Season data acquisition: the OpenF1 API, JSON snapshots, and conversion
//! into the forecast crate's types.

mod convert;
mod dates;
mod error;
mod openf1;
mod records;
mod sessions;
mod snapshot;
mod source;

pub use convert::{FeedSeason, Roster, UNKNOWN_TEAM};
pub use dates::parse_timestamp;
pub use error::FetchError;
pub use openf1::OpenF1Client;
pub use records::{DriverRecord, ResultRecord, SessionRecord};
pub use sessions::session_kind;
pub use snapshot::{SNAPSHOT_SCHEMA_VERSION, SeasonSnapshot, SnapshotFile, SnapshotMeta};
pub use source::{SeasonSource, SnapshotSource};
