//! Route table and navigation history.

mod navigator;
mod route;

pub use navigator::{NavMode, Navigator};
pub use route::{NavError, Route};
