#![forbid(unsafe_code)]

mod registry;

pub use registry::ParticipantRegistry;
