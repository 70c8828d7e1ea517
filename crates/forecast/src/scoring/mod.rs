#![forbid(unsafe_code)]

mod session_score;

pub use session_score::{ScoreTable, SessionScoreAggregator};
