//! Pop-out window records and the capability interface of their handles.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tags::WindowKind;

/// Non-owning view of an externally created window or process.
///
/// Whoever opened the pop-out keeps ownership of it. The registry only
/// stores the handle, asks whether it is still alive, and asks it to come to
/// the foreground.
pub trait WindowHandle: Send + Sync + fmt::Debug {
    /// Returns `false` once the window was closed by the user or the OS.
    fn is_alive(&self) -> bool;

    /// Requests that the window bring itself to the foreground.
    fn focus(&self);
}

/// A registered pop-out window.
#[derive(Debug, Clone)]
pub struct WindowInfo {
    /// Identifier inside its category, usually the room id.
    pub id: String,
    pub kind: WindowKind,
    /// Display name, when the opener already knows it.
    pub name: Option<String>,
    /// Member count shown in the window title, if known.
    pub user_count: Option<u32>,
    /// Handle of the real window. Absent until the opener attaches one.
    pub handler: Option<Arc<dyn WindowHandle>>,
}

impl WindowInfo {
    pub fn new(kind: WindowKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            user_count: None,
            handler: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_count(mut self, user_count: u32) -> Self {
        self.user_count = Some(user_count);
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn WindowHandle>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Serializable projection without the handle.
    pub fn summary(&self) -> WindowSummary {
        WindowSummary {
            id: self.id.clone(),
            kind: self.kind,
            name: self.name.clone(),
            user_count: self.user_count,
            has_handler: self.handler.is_some(),
        }
    }
}

/// What consumers across the bridge get to see of a [`WindowInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WindowKind,
    pub name: Option<String>,
    pub user_count: Option<u32>,
    pub has_handler: bool,
}
