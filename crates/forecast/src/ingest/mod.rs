#![forbid(unsafe_code)]

mod history;

pub use history::{LedgerBuilder, LedgerHistory};
