use crate::signals::SignalEvent;
use flume::SendError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to install signal handler: {0}")]
    SignalHandler(#[source] io::Error),

    #[error("Failed to send signal event: {0}")]
    SendSignal(#[from] SendError<SignalEvent>),

    #[error("Forecast interrupted by {0:?}, partial results discarded")]
    Interrupted(SignalEvent),

    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}
