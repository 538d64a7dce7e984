//! Observable state of a single resource slot.

use super::error::FetchError;
use crate::mvi::ViewState;

/// Coarse classification of a [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Pending,
    Success,
    Error,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Pending => "pending",
            FetchStatus::Success => "success",
            FetchStatus::Error => "error",
        }
    }
}

/// What a fetcher currently knows about its resource.
///
/// Every non-idle variant carries the key it was computed for. Data and
/// error live in different variants, so they can never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No key is being observed.
    Idle,
    /// A request for `key` is outstanding.
    Pending { key: String },
    /// The request for `key` returned a 2xx response that decoded.
    Success { key: String, data: T },
    /// The request for `key` failed.
    Error { key: String, error: FetchError },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn status(&self) -> FetchStatus {
        match self {
            FetchState::Idle => FetchStatus::Idle,
            FetchState::Pending { .. } => FetchStatus::Pending,
            FetchState::Success { .. } => FetchStatus::Success,
            FetchState::Error { .. } => FetchStatus::Error,
        }
    }

    pub fn request_key(&self) -> Option<&str> {
        match self {
            FetchState::Idle => None,
            FetchState::Pending { key }
            | FetchState::Success { key, .. }
            | FetchState::Error { key, .. } => Some(key),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending { .. })
    }
}

/// Reducer state: the published [`FetchState`] plus the ticket of the
/// request it belongs to.
///
/// Tickets increase with every `Begin`/`Clear`, so a settlement carrying
/// an older ticket is recognisably stale even when the key repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSlot<T> {
    pub ticket: u64,
    pub state: FetchState<T>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            ticket: 0,
            state: FetchState::Idle,
        }
    }
}

impl<T> ViewState for FetchSlot<T> where T: Clone + PartialEq + Send + 'static {}
