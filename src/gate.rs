//! Access gate for the guarded part of the route table.
//!
//! The gate holds no state. It is evaluated on every navigation into a
//! guarded route, so re-authenticating is enough to get past it next time.

use crate::nav::Route;
use crate::session::Session;

/// Outcome of evaluating the gate for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The guarded view may mount.
    Granted,
    /// Show `redirect` instead, replacing the current history entry.
    Denied { redirect: Route },
}

pub fn can_enter(session: &Session) -> bool {
    session.is_authenticated()
}

/// Decide whether `target` may mount for `session`.
pub fn decide(session: &Session, target: &Route) -> GateDecision {
    if !target.is_guarded() || can_enter(session) {
        GateDecision::Granted
    } else {
        GateDecision::Denied {
            redirect: Route::Login,
        }
    }
}
