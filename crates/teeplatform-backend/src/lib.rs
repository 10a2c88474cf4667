//! Backend runtime entry point and public API surface.
//!
//! This crate owns the UI state store for the lifetime of the client, applies
//! bridge commands to it one at a time, and publishes its diffs back over the
//! bridge.

mod app;
pub mod config;
mod runtime;
mod services;
mod state;

pub use crate::app::AppContext;
pub use crate::runtime::run;
pub use crate::state::{SharedState, State};
