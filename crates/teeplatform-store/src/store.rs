//! The UI window/session state store.

use teeplatform_bridge::change::{
    AppInputs, FriendSelection, Rect, RoomMemberModal, StateChange, SubAppState, UiSnapshot,
};
use teeplatform_bridge::config::StartupConfig;
use teeplatform_bridge::tags::{AppKind, Layout, ResourceType, WindowKind};
use teeplatform_bridge::window::WindowInfo;

use crate::observer::{Listener, Observers, SubscriptionId};
use crate::registry::WindowRegistry;
use crate::route::Route;

/// Single source of truth for what is shown and which pop-out windows are
/// open.
///
/// Every operation is synchronous and infallible. Lookups of missing entries
/// yield `None` and mutations of missing entries do nothing. Each effective
/// mutation is published to the subscribed listeners, in registration order,
/// after the state is fully updated.
#[derive(Debug)]
pub struct UiWindowStateStore {
    resource_type: ResourceType,
    tab_type: ResourceType,
    resource_id: Option<String>,
    main_app: AppKind,
    sub_app: Option<AppKind>,
    sub_app_state: Option<SubAppState>,
    layout: Layout,
    is_search_visible: bool,
    talk_windows: WindowRegistry,
    meeting_windows: WindowRegistry,
    room_member_modal: RoomMemberModal,
    total_unread_count: u32,
    content_rect: Option<Rect>,
    friend_selection: FriendSelection,
    observers: Observers,
}

impl Default for UiWindowStateStore {
    fn default() -> Self {
        Self::new(&StartupConfig::default())
    }
}

impl UiWindowStateStore {
    pub fn new(startup: &StartupConfig) -> Self {
        Self {
            resource_type: ResourceType::None,
            tab_type: ResourceType::None,
            resource_id: None,
            main_app: startup.main_app,
            sub_app: None,
            sub_app_state: None,
            layout: startup.layout,
            is_search_visible: false,
            talk_windows: WindowRegistry::new(),
            meeting_windows: WindowRegistry::new(),
            room_member_modal: RoomMemberModal::default(),
            total_unread_count: 0,
            content_rect: None,
            friend_selection: FriendSelection::default(),
            observers: Observers::default(),
        }
    }

    /// Registers a listener called after every effective mutation.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&StateChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let listener: Listener = Box::new(listener);
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&self, change: StateChange) {
        log::debug!("UI state changed: {change:?}");
        self.observers.notify(&change);
    }

    // ===== Resource / tab / pane state =====

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn tab_type(&self) -> ResourceType {
        self.tab_type
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    pub fn main_app(&self) -> AppKind {
        self.main_app
    }

    pub fn sub_app(&self) -> Option<AppKind> {
        self.sub_app
    }

    pub fn sub_app_state(&self) -> Option<&SubAppState> {
        self.sub_app_state.as_ref()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_search_visible(&self) -> bool {
        self.is_search_visible
    }

    /// Selects the displayed resource. The id is not checked against
    /// anything, and the tab is left alone.
    pub fn set_resource(&mut self, resource_type: ResourceType, resource_id: Option<String>) {
        if self.resource_type == resource_type && self.resource_id == resource_id {
            return;
        }
        self.resource_type = resource_type;
        self.resource_id = resource_id.clone();
        self.emit(StateChange::ResourceChanged {
            resource_type,
            resource_id,
        });
    }

    /// Switches the visible tab without a navigation.
    pub fn set_tab(&mut self, tab: ResourceType) {
        if self.tab_type == tab {
            return;
        }
        self.tab_type = tab;
        self.emit(StateChange::TabChanged { tab });
    }

    pub fn set_layout(&mut self, layout: Layout) {
        if self.layout == layout {
            return;
        }
        self.layout = layout;
        self.emit(StateChange::LayoutChanged { layout });
    }

    pub fn set_main_app(&mut self, app: AppKind) {
        if self.main_app == app {
            return;
        }
        self.main_app = app;
        self.emit(StateChange::MainAppChanged { app });
    }

    pub fn set_sub_app(&mut self, app: Option<AppKind>) {
        if self.sub_app == app {
            return;
        }
        self.sub_app = app;
        self.emit(StateChange::SubAppChanged { app });
    }

    /// Relays a state report from the sub-application.
    pub fn set_sub_app_state(&mut self, state: Option<SubAppState>) {
        if self.sub_app_state == state {
            return;
        }
        self.sub_app_state = state.clone();
        self.emit(StateChange::SubAppStateChanged { state });
    }

    pub fn set_search_visible(&mut self, visible: bool) {
        if self.is_search_visible == visible {
            return;
        }
        self.is_search_visible = visible;
        self.emit(StateChange::SearchVisibilityChanged { visible });
    }

    /// Applies a router location: resource, tab, and panes. A route without a
    /// main app keeps the current one; a route without `?sub=` closes the
    /// sub pane.
    pub fn apply_route(&mut self, route: &Route) {
        self.set_resource(route.resource_type, Some(route.resource_id.clone()));
        self.set_tab(route.resource_type);
        if let Some(app) = route.main_app {
            self.set_main_app(app);
        }
        self.set_sub_app(route.sub_app);
    }

    // ===== Window registry =====

    fn registry(&self, kind: WindowKind) -> &WindowRegistry {
        match kind {
            WindowKind::Talk => &self.talk_windows,
            WindowKind::Meeting => &self.meeting_windows,
        }
    }

    fn registry_mut(&mut self, kind: WindowKind) -> &mut WindowRegistry {
        match kind {
            WindowKind::Talk => &mut self.talk_windows,
            WindowKind::Meeting => &mut self.meeting_windows,
        }
    }

    /// Registers a window. When an entry with the same id exists and
    /// `focus_if_exists` is set, the existing entry is focused and kept as
    /// is; otherwise the entry is inserted or overwritten.
    pub fn open_window(&mut self, info: WindowInfo, focus_if_exists: bool) {
        let kind = info.kind;
        if focus_if_exists && self.registry(kind).contains(&info.id) {
            self.focus_window(kind, &info.id);
            return;
        }

        let summary = info.summary();
        log::debug!("Registering {kind} window {}", info.id);
        self.registry_mut(kind).insert(info);
        self.emit(StateChange::WindowOpened { window: summary });
    }

    /// Brings a registered window to the foreground if its handle is still
    /// alive. Missing entries, entries without a handle, and dead handles
    /// are ignored. The registry is never modified.
    pub fn focus_window(&self, kind: WindowKind, id: &str) {
        let Some(handler) = self.registry(kind).get(id).and_then(|w| w.handler.clone()) else {
            return;
        };
        if !handler.is_alive() {
            log::debug!("Not focusing {kind} window {id}: handle is closed");
            return;
        }
        handler.focus();
        self.emit(StateChange::WindowFocused {
            kind,
            id: id.to_string(),
        });
    }

    /// Drops the entry of `(kind, id)`. Closing an absent window is a no-op.
    pub fn close_window(&mut self, kind: WindowKind, id: &str) {
        if self.registry_mut(kind).remove(id).is_none() {
            return;
        }
        self.emit(StateChange::WindowClosed {
            kind,
            id: id.to_string(),
        });
    }

    /// Closes every window of one category, one by one.
    pub fn close_all_windows(&mut self, kind: WindowKind) {
        for id in self.registry(kind).ids() {
            self.close_window(kind, &id);
        }
    }

    /// Owned snapshot of the windows of one category, in opening order.
    pub fn get_windows(&self, kind: WindowKind) -> Vec<WindowInfo> {
        self.registry(kind).snapshot()
    }

    pub fn get_window(&self, kind: WindowKind, id: &str) -> Option<WindowInfo> {
        self.registry(kind).get(id).cloned()
    }

    pub fn window_count(&self, kind: WindowKind) -> usize {
        self.registry(kind).len()
    }

    // ===== Room member modal =====

    pub fn room_member_modal(&self) -> RoomMemberModal {
        self.room_member_modal
    }

    /// Shows the modal. A position that is not given keeps its last value.
    pub fn open_room_member_modal(&mut self, top: Option<f32>, left: Option<f32>, is_edit: bool) {
        let mut modal = self.room_member_modal;
        modal.visible = true;
        modal.is_edit = is_edit;
        if top.is_some() {
            modal.top = top;
        }
        if left.is_some() {
            modal.left = left;
        }
        self.set_room_member_modal(modal);
    }

    pub fn close_room_member_modal(&mut self) {
        let mut modal = self.room_member_modal;
        modal.visible = false;
        self.set_room_member_modal(modal);
    }

    fn set_room_member_modal(&mut self, modal: RoomMemberModal) {
        if self.room_member_modal == modal {
            return;
        }
        self.room_member_modal = modal;
        self.emit(StateChange::RoomMemberModalChanged { modal });
    }

    // ===== Counters and geometry =====

    pub fn total_unread_count(&self) -> u32 {
        self.total_unread_count
    }

    pub fn set_total_unread_count(&mut self, count: u32) {
        if self.total_unread_count == count {
            return;
        }
        self.total_unread_count = count;
        self.emit(StateChange::UnreadCountChanged { count });
    }

    pub fn content_rect(&self) -> Option<Rect> {
        self.content_rect
    }

    pub fn set_content_rect(&mut self, rect: Option<Rect>) {
        if self.content_rect == rect {
            return;
        }
        self.content_rect = rect;
        self.emit(StateChange::ContentRectChanged { rect });
    }

    // ===== Friend sidebar =====

    pub fn friend_selection(&self) -> &FriendSelection {
        &self.friend_selection
    }

    /// Highlights a friend in the main list and clears the favorites list.
    pub fn select_friend(&mut self, friend_id: Option<String>) {
        self.set_friend_selection(FriendSelection {
            active_friend_id: friend_id,
            active_favorite_friend_id: None,
        });
    }

    /// Highlights a friend in the favorites list and clears the main list.
    pub fn select_favorite_friend(&mut self, friend_id: Option<String>) {
        self.set_friend_selection(FriendSelection {
            active_friend_id: None,
            active_favorite_friend_id: friend_id,
        });
    }

    pub fn clear_friend_selection(&mut self) {
        self.set_friend_selection(FriendSelection::default());
    }

    fn set_friend_selection(&mut self, selection: FriendSelection) {
        if self.friend_selection == selection {
            return;
        }
        self.friend_selection = selection.clone();
        self.emit(StateChange::FriendSelectionChanged { selection });
    }

    // ===== Derived queries =====

    /// The selected room id, only while a room is the current resource.
    pub fn room_id(&self) -> Option<&str> {
        match self.resource_type {
            ResourceType::Room => self.resource_id.as_deref(),
            _ => None,
        }
    }

    pub fn app_inputs(&self) -> AppInputs {
        AppInputs {
            room_id: self.room_id().map(str::to_string),
            channel_type: self.main_app.channel_code().map(str::to_string),
            layout: self.layout,
        }
    }

    /// Router path of what is currently shown, once a resource is selected.
    pub fn location(&self) -> Option<String> {
        if self.resource_type.url_code().is_none() {
            return None;
        }
        let route = Route {
            resource_type: self.resource_type,
            resource_id: self.resource_id.clone()?,
            main_app: Some(self.main_app),
            sub_app: self.sub_app,
        };
        Some(route.to_path())
    }

    /// Percent widths of the main and sub panes. Mail gives the sub pane
    /// the larger share.
    pub fn pane_split(&self) -> (u8, u8) {
        match self.resource_type {
            ResourceType::Mail => (38, 62),
            _ => (75, 25),
        }
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            resource_type: self.resource_type,
            tab_type: self.tab_type,
            resource_id: self.resource_id.clone(),
            main_app: self.main_app,
            sub_app: self.sub_app,
            sub_app_state: self.sub_app_state.clone(),
            layout: self.layout,
            is_search_visible: self.is_search_visible,
            talk_windows: self.talk_windows.iter().map(WindowInfo::summary).collect(),
            meeting_windows: self.meeting_windows.iter().map(WindowInfo::summary).collect(),
            room_member_modal: self.room_member_modal,
            total_unread_count: self.total_unread_count,
            content_rect: self.content_rect,
            friend_selection: self.friend_selection.clone(),
            app_inputs: self.app_inputs(),
            pane_split: self.pane_split(),
            location: self.location(),
        }
    }
}
