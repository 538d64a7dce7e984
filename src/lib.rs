pub mod app;
pub mod config;
pub mod fetch;
pub mod gate;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod nav;
pub mod session;
pub mod signup;
pub mod storage;
