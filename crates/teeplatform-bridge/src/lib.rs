//! Communication bridge between UI consumers and the state backend.
//!
//! This crate defines the tags, records and messages shared by the
//! synchronous UI state store, the asynchronous backend that owns it, and
//! whatever drives the backend (a view layer, a console, tests).
//!
//! The flow is unidirectional:
//! - Consumers send commands ([`MessageToBackend`]) that request mutations
//!   or queries.
//! - The backend pushes events ([`MessageFromBackend`]): one
//!   [`change::StateChange`] per effective mutation, plus query responses and
//!   notifications.
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`].

pub mod change;
pub mod config;
pub mod notification;
pub mod tags;
pub mod window;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::change::{Rect, StateChange, SubAppState, UiSnapshot};
use crate::tags::{AppKind, Layout, ResourceType, WindowKind};
use crate::window::{WindowInfo, WindowSummary};

/// Messages emitted by the backend to inform consumers of state updates.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Published after every effective mutation, in mutation order.
    StateChanged(StateChange),
    /// Response to [`MessageToBackend::ConfigurationRequest`].
    ConfigurationResponse(config::Config),
    /// Response to [`MessageToBackend::SnapshotRequest`].
    SnapshotResponse(UiSnapshot),
    /// Response to [`MessageToBackend::WindowsRequest`].
    #[serde(rename_all = "camelCase")]
    WindowsResponse {
        kind: WindowKind,
        windows: Vec<WindowSummary>,
    },
}

/// Commands issued by consumers to mutate or query the UI state.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Replace the configuration and persist it. Startup settings apply on
    /// the next launch.
    UpdateConfiguration(config::Config),
    /// Request for a full copy of the current state.
    SnapshotRequest,
    /// Request for the registered windows of one category.
    WindowsRequest(WindowKind),
    SetResource {
        resource_type: ResourceType,
        resource_id: Option<String>,
    },
    SetTab(ResourceType),
    SetLayout(Layout),
    SetMainApp(AppKind),
    SetSubApp(Option<AppKind>),
    /// Relay of a sub-application's own state report.
    SetSubAppState(Option<SubAppState>),
    SetSearchVisible(bool),
    /// Router path such as `/s/room-1/talk?sub=drive`.
    ApplyRoute(String),
    OpenWindow {
        window: WindowInfo,
        /// Falls back to the configured default when `None`.
        focus_if_exists: Option<bool>,
    },
    FocusWindow {
        kind: WindowKind,
        id: String,
    },
    CloseWindow {
        kind: WindowKind,
        id: String,
    },
    CloseAllWindows(WindowKind),
    OpenRoomMemberModal {
        top: Option<f32>,
        left: Option<f32>,
        is_edit: bool,
    },
    CloseRoomMemberModal,
    SetTotalUnreadCount(u32),
    /// Bounds of the main content region, as measured by the view layer.
    SetContentRect(Option<Rect>),
    SelectFriend(Option<String>),
    SelectFavoriteFriend(Option<String>),
    ClearFriendSelection,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between a
/// consumer and the backend.
pub struct BridgeChannels {
    /// Receiver used by the consumer to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the consumer to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the consumer.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the consumer.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
