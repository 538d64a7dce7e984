use super::error::FetchError;
use crate::mvi::Intent;

/// Intents dispatched to a fetch slot.
#[derive(Debug, Clone)]
pub enum FetchIntent<T> {
    /// The observed key went away.
    Clear { ticket: u64 },

    /// A request for `key` was issued under `ticket`.
    Begin { ticket: u64, key: String },

    /// The request issued under `ticket` finished.
    Settle {
        ticket: u64,
        outcome: Result<T, FetchError>,
    },
}

impl<T: Send + 'static> Intent for FetchIntent<T> {}
