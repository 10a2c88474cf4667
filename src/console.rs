//! Headless consumer that drives the backend from stdin.
//!
//! Commands are JSON objects, one per line:
//!
//! ```json
//! {"type": "navigate", "path": "/s/room-1/talk?sub=drive"}
//! {"type": "openWindow", "windowType": "meeting", "id": "room-1"}
//! {"type": "closeAllWindows", "windowType": "talk"}
//! {"type": "getSnapshot"}
//! ```
//!
//! Every message from the backend is printed to stdout as one JSON line.

use std::io::{BufRead, Write};

use serde::Deserialize;
use teeplatform_bridge::change::{Rect, SubAppState};
use teeplatform_bridge::tags::{AppKind, Layout, ResourceType, WindowKind};
use teeplatform_bridge::window::WindowInfo;
use teeplatform_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

/// Commands accepted on stdin.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConsoleCommand {
    GetConfig,
    GetSnapshot,
    GetWindows {
        window_type: WindowKind,
    },
    SetResource {
        resource_type: ResourceType,
        #[serde(default)]
        resource_id: Option<String>,
    },
    SetTab {
        tab: ResourceType,
    },
    SetLayout {
        layout: Layout,
    },
    SetMainApp {
        app: AppKind,
    },
    SetSubApp {
        #[serde(default)]
        app: Option<AppKind>,
    },
    SetSubAppState {
        #[serde(default)]
        state: Option<SubAppState>,
    },
    SetSearchVisible {
        visible: bool,
    },
    /// Apply a router path.
    Navigate {
        path: String,
    },
    OpenWindow {
        window_type: WindowKind,
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        user_count: Option<u32>,
        #[serde(default)]
        focus_if_exists: Option<bool>,
    },
    FocusWindow {
        window_type: WindowKind,
        id: String,
    },
    CloseWindow {
        window_type: WindowKind,
        id: String,
    },
    CloseAllWindows {
        window_type: WindowKind,
    },
    OpenRoomMemberModal {
        #[serde(default)]
        top: Option<f32>,
        #[serde(default)]
        left: Option<f32>,
        #[serde(default)]
        is_edit: bool,
    },
    CloseRoomMemberModal,
    SetUnreadCount {
        count: u32,
    },
    SetContentRect {
        #[serde(default)]
        rect: Option<Rect>,
    },
    SelectFriend {
        #[serde(default)]
        friend_id: Option<String>,
    },
    SelectFavoriteFriend {
        #[serde(default)]
        friend_id: Option<String>,
    },
    ClearFriendSelection,
}

impl From<ConsoleCommand> for MessageToBackend {
    fn from(command: ConsoleCommand) -> Self {
        match command {
            ConsoleCommand::GetConfig => MessageToBackend::ConfigurationRequest,
            ConsoleCommand::GetSnapshot => MessageToBackend::SnapshotRequest,
            ConsoleCommand::GetWindows { window_type } => {
                MessageToBackend::WindowsRequest(window_type)
            }
            ConsoleCommand::SetResource {
                resource_type,
                resource_id,
            } => MessageToBackend::SetResource {
                resource_type,
                resource_id,
            },
            ConsoleCommand::SetTab { tab } => MessageToBackend::SetTab(tab),
            ConsoleCommand::SetLayout { layout } => MessageToBackend::SetLayout(layout),
            ConsoleCommand::SetMainApp { app } => MessageToBackend::SetMainApp(app),
            ConsoleCommand::SetSubApp { app } => MessageToBackend::SetSubApp(app),
            ConsoleCommand::SetSubAppState { state } => MessageToBackend::SetSubAppState(state),
            ConsoleCommand::SetSearchVisible { visible } => {
                MessageToBackend::SetSearchVisible(visible)
            }
            ConsoleCommand::Navigate { path } => MessageToBackend::ApplyRoute(path),
            ConsoleCommand::OpenWindow {
                window_type,
                id,
                name,
                user_count,
                focus_if_exists,
            } => MessageToBackend::OpenWindow {
                // pop-outs opened from the console have no real window behind them
                window: WindowInfo {
                    id,
                    kind: window_type,
                    name,
                    user_count,
                    handler: None,
                },
                focus_if_exists,
            },
            ConsoleCommand::FocusWindow { window_type, id } => MessageToBackend::FocusWindow {
                kind: window_type,
                id,
            },
            ConsoleCommand::CloseWindow { window_type, id } => MessageToBackend::CloseWindow {
                kind: window_type,
                id,
            },
            ConsoleCommand::CloseAllWindows { window_type } => {
                MessageToBackend::CloseAllWindows(window_type)
            }
            ConsoleCommand::OpenRoomMemberModal { top, left, is_edit } => {
                MessageToBackend::OpenRoomMemberModal { top, left, is_edit }
            }
            ConsoleCommand::CloseRoomMemberModal => MessageToBackend::CloseRoomMemberModal,
            ConsoleCommand::SetUnreadCount { count } => {
                MessageToBackend::SetTotalUnreadCount(count)
            }
            ConsoleCommand::SetContentRect { rect } => MessageToBackend::SetContentRect(rect),
            ConsoleCommand::SelectFriend { friend_id } => MessageToBackend::SelectFriend(friend_id),
            ConsoleCommand::SelectFavoriteFriend { friend_id } => {
                MessageToBackend::SelectFavoriteFriend(friend_id)
            }
            ConsoleCommand::ClearFriendSelection => MessageToBackend::ClearFriendSelection,
        }
    }
}

/// Reads commands from stdin until EOF and forwards them to the backend.
/// Lines that do not parse are logged and skipped.
pub fn read_commands(tx: Sender<MessageToBackend>) {
    log::info!("Console listener started");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Error reading stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ConsoleCommand>(&line) {
            Ok(command) => {
                log::debug!("Parsed command: {command:?}");
                if tx.blocking_send(command.into()).is_err() {
                    log::warn!("Backend channel closed, exiting");
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring command {line:?}: {e}"),
        }
    }
    log::info!("Console listener exiting");
}

/// Prints backend messages as JSON lines until the backend hangs up.
pub fn print_messages(mut rx: Receiver<MessageFromBackend>) {
    let stdout = std::io::stdout();
    while let Some(message) = rx.blocking_recv() {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to serialize backend message: {e}");
                continue;
            }
        };
        let mut out = stdout.lock();
        if writeln!(out, "{line}").and_then(|()| out.flush()).is_err() {
            log::warn!("Stdout closed, no longer printing backend messages");
            break;
        }
    }
}
