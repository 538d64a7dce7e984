//! Intent/reducer plumbing for observable state.
//!
//! ```text
//! caller or network ──→ Intent ──→ Reducer::reduce ──→ State ──→ subscribers
//! ```
//!
//! Nothing mutates a published state in place. Owners keep the current
//! state, feed it to the reducer together with an intent and publish
//! whatever comes back.

/// Something that happened to a state owner: a key was observed, a
/// response arrived, a retry was asked for.
pub trait Intent: Send + 'static {}

/// A snapshot handed to subscribers. Compared on publish so unchanged
/// snapshots are not re-sent.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}

/// Pure transition function from one snapshot to the next.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    /// Consume the current snapshot and produce the next one. Must not
    /// perform I/O or spawn work.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
