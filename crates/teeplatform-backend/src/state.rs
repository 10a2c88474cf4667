use teeplatform_store::UiWindowStateStore;

/// The core application state that holds configuration and the UI state
/// store.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]). Each command mutates the store under a
/// single write guard, so readers never see a half-applied command.
#[derive(Debug)]
pub struct State {
    /// The loaded application configuration.
    pub config: teeplatform_bridge::config::Config,
    /// Path of the configuration file the config was loaded from.
    pub config_path: std::path::PathBuf,
    /// The UI window/session state.
    pub store: UiWindowStateStore,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
