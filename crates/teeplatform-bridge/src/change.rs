//! State diffs published by the store, and the plain-data records they carry.

use serde::{Deserialize, Serialize};

use crate::tags::{AppKind, Layout, ResourceType, WindowKind};
use crate::window::WindowSummary;

/// Free-form state reported by an embedded sub-application (e.g. whether an
/// embedded meeting is still running). Relayed without interpretation.
pub type SubAppState = serde_json::Value;

/// Bounds of a view region, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Visibility and placement of the room member modal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberModal {
    pub visible: bool,
    /// Opened in edit mode (member invite) rather than read-only.
    pub is_edit: bool,
    pub top: Option<f32>,
    pub left: Option<f32>,
}

/// Highlighted entries of the friend sidebar. At most one of the two lists
/// has a selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSelection {
    pub active_friend_id: Option<String>,
    pub active_favorite_friend_id: Option<String>,
}

/// Read-only inputs handed to embedded sub-applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInputs {
    /// Selected room, when the current resource is a room.
    pub room_id: Option<String>,
    /// Channel type of the main application, see [`AppKind::channel_code`].
    pub channel_type: Option<String>,
    pub layout: Layout,
}

/// One effective mutation of the UI state.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum StateChange {
    #[serde(rename_all = "camelCase")]
    ResourceChanged {
        resource_type: ResourceType,
        resource_id: Option<String>,
    },
    TabChanged { tab: ResourceType },
    MainAppChanged { app: AppKind },
    SubAppChanged { app: Option<AppKind> },
    SubAppStateChanged { state: Option<SubAppState> },
    LayoutChanged { layout: Layout },
    SearchVisibilityChanged { visible: bool },
    WindowOpened { window: WindowSummary },
    WindowFocused { kind: WindowKind, id: String },
    WindowClosed { kind: WindowKind, id: String },
    RoomMemberModalChanged { modal: RoomMemberModal },
    UnreadCountChanged { count: u32 },
    ContentRectChanged { rect: Option<Rect> },
    FriendSelectionChanged { selection: FriendSelection },
}

/// Full copy of the UI state at one point in time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSnapshot {
    pub resource_type: ResourceType,
    pub tab_type: ResourceType,
    pub resource_id: Option<String>,
    pub main_app: AppKind,
    pub sub_app: Option<AppKind>,
    pub sub_app_state: Option<SubAppState>,
    pub layout: Layout,
    pub is_search_visible: bool,
    pub talk_windows: Vec<WindowSummary>,
    pub meeting_windows: Vec<WindowSummary>,
    pub room_member_modal: RoomMemberModal,
    pub total_unread_count: u32,
    pub content_rect: Option<Rect>,
    pub friend_selection: FriendSelection,
    pub app_inputs: AppInputs,
    /// Percent widths of the main and sub panes.
    pub pane_split: (u8, u8),
    /// Router path of what is shown, e.g. `/s/room-1/talk`.
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_are_tagged_for_consumers() {
        let change = StateChange::ResourceChanged {
            resource_type: ResourceType::Room,
            resource_id: Some("room-42".to_string()),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["change"], "resourceChanged");
        assert_eq!(json["resourceType"], "room");
        assert_eq!(json["resourceId"], "room-42");
    }

    #[test]
    fn window_summary_uses_type_key() {
        let change = StateChange::WindowOpened {
            window: WindowSummary {
                id: "R1".to_string(),
                kind: WindowKind::Meeting,
                name: None,
                user_count: Some(3),
                has_handler: false,
            },
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["window"]["type"], "meeting");
        assert_eq!(json["window"]["userCount"], 3);
    }

    #[test]
    fn app_inputs_use_camel_case_keys() {
        let inputs = AppInputs {
            room_id: Some("room-1".to_string()),
            channel_type: AppKind::Note.channel_code().map(str::to_string),
            layout: Layout::Expanded,
        };
        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json["roomId"], "room-1");
        assert_eq!(json["channelType"], "CHN0003");
        assert_eq!(json["layout"], "expand");
    }
}
