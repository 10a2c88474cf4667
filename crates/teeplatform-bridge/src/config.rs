use serde::{Deserialize, Serialize};

use crate::tags::{AppKind, Layout};

/// Initial contents of the panes when the client starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartupConfig {
    /// Application shown in the main pane before any route is applied.
    pub main_app: AppKind,
    /// Pane proportions at startup.
    pub layout: Layout,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            main_app: AppKind::Talk,
            layout: Layout::Collapsed,
        }
    }
}

/// Behaviour of the pop-out window registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Whether opening a window that is already registered focuses it
    /// instead of replacing the entry. Used when a request does not say.
    pub focus_existing: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            focus_existing: true,
        }
    }
}

/// Global application configuration. Missing sections fall back to their
/// defaults so older files keep loading.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub startup: StartupConfig,
    pub windows: WindowConfig,
}
