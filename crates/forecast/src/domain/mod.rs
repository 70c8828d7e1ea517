#![forbid(unsafe_code)]

mod event;
mod ids;
mod ledger;
mod points;
mod session;

pub use event::{EventRecord, Schedule};
pub use ids::{ParticipantId, ParticipantKey};
pub use ledger::PointsLedger;
pub use points::PointsTable;
pub use session::{Classification, Session, SessionKind, SessionResult};
