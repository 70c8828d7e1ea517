#![forbid(unsafe_code)]

use slotmap::new_key_type;
use std::fmt;

new_key_type! { pub struct ParticipantId; }

/// External identity of a participant: a driver's racing number or a team's
/// name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticipantKey {
    Driver(u32),
    Team(String),
}

impl ParticipantKey {
    pub fn driver(number: u32) -> Self {
        Self::Driver(number)
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self::Team(name.into())
    }
}

impl fmt::Debug for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(number) => f.debug_tuple("Driver").field(number).finish(),
            Self::Team(name) => f.debug_tuple("Team").field(name).finish(),
        }
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(number) => write!(f, "#{number}"),
            Self::Team(name) => f.write_str(name),
        }
    }
}
