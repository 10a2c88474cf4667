//! Service handlers for bridge commands that need more than a single store
//! call: parsing, configuration defaults, queries, and notifications.

pub mod config_service;
pub mod view_service;
pub mod window_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::AppContext>;
