//! Per-application shared state: who is logged in and which theme is on.
//!
//! The state lives inside a [`ContextProvider`] owned by the application.
//! Views receive cheap [`ContextHandle`]s and mutate the state only through
//! `login`, `logout` and `toggle_theme`.

mod context;
mod identity;
mod theme;

pub use context::{ContextHandle, ContextProvider};
pub use identity::{
    EntropyRoller, HeroClass, Identity, Session, StatRoller, CURRENCY_RANGE, EXPERIENCE_RANGE,
    LEVEL_RANGE,
};
pub use theme::{LogThemeSink, Theme, ThemeSink};
