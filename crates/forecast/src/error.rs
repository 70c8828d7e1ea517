#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),

    #[error("simulation of {trials} trials cancelled, partial results discarded")]
    Cancelled { trials: u32 },

    #[error("failed to build weighted sampler: {0}")]
    Sampler(#[from] rand::distributions::WeightedError),
}

/// Parameters rejected before any work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidConfiguration {
    #[error("trial count must be positive")]
    ZeroTrials,

    #[error(
        "{completed} events completed but the season only has {total_events}, remaining would be {remaining}"
    )]
    NegativeRemainingEvents {
        total_events: u32,
        completed: usize,
        remaining: i64,
    },

    #[error("weight `{name}` must be finite and nonnegative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("baseline discount must lie in [0, 1], got {0}")]
    DiscountOutOfRange(f64),

    #[error("points table must award at least one position")]
    EmptyPointsTable,
}
