//! Application context and message dispatching utilities.
//!
//! The context owns the shared state, routes bridge commands to the service
//! handlers, and forwards the store's diffs back to the consumer in mutation
//! order.

use std::path::PathBuf;
use std::sync::Arc;

use teeplatform_bridge::change::StateChange;
use teeplatform_bridge::config::Config;
use teeplatform_bridge::notification::{NotificationMessage, NotificationType};
use teeplatform_bridge::{MessageFromBackend, MessageToBackend};
use teeplatform_store::UiWindowStateStore;
use tokio::sync::{
    Mutex, RwLock,
    mpsc::{self, Receiver, Sender, UnboundedReceiver},
};

use crate::services;
use crate::state::{SharedState, State};

/// Shared application context passed to services and message handlers.
pub struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the consumer.
    pub tx: Sender<MessageFromBackend>,
    /// Diffs recorded by the store listener, not yet forwarded.
    changes: Mutex<UnboundedReceiver<StateChange>>,
}

impl AppContext {
    /// Builds the store from `config` and subscribes the diff relay to it.
    pub fn new(config: Config, config_path: PathBuf, tx: Sender<MessageFromBackend>) -> Self {
        let (changes_tx, changes_rx) = mpsc::unbounded_channel();
        let mut store = UiWindowStateStore::new(&config.startup);
        store.subscribe(move |change| {
            // the receiver lives as long as the context
            let _ = changes_tx.send(change.clone());
        });

        Self {
            state: Arc::new(RwLock::new(State {
                config,
                config_path,
                store,
            })),
            tx,
            changes: Mutex::new(changes_rx),
        }
    }

    /// Read and dispatch messages from the consumer until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a bridge message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Bridge closed, backend is stopping");
    }

    /// Dispatches one command to its service handler, then forwards every
    /// diff it produced.
    pub async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::UpdateConfiguration(config) => {
                services::config_service::handle_update_config(self.clone(), config).await;
            }
            MessageToBackend::SnapshotRequest => {
                services::view_service::handle_snapshot_request(self.clone()).await;
            }
            MessageToBackend::WindowsRequest(kind) => {
                services::window_service::handle_windows_request(self.clone(), kind).await;
            }
            MessageToBackend::SetResource {
                resource_type,
                resource_id,
            } => {
                self.with_store(|store| store.set_resource(resource_type, resource_id))
                    .await;
            }
            MessageToBackend::SetTab(tab) => {
                self.with_store(|store| store.set_tab(tab)).await;
            }
            MessageToBackend::SetLayout(layout) => {
                self.with_store(|store| store.set_layout(layout)).await;
            }
            MessageToBackend::SetMainApp(app) => {
                self.with_store(|store| store.set_main_app(app)).await;
            }
            MessageToBackend::SetSubApp(app) => {
                self.with_store(|store| store.set_sub_app(app)).await;
            }
            MessageToBackend::SetSubAppState(state) => {
                self.with_store(|store| store.set_sub_app_state(state)).await;
            }
            MessageToBackend::SetSearchVisible(visible) => {
                self.with_store(|store| store.set_search_visible(visible))
                    .await;
            }
            MessageToBackend::ApplyRoute(location) => {
                services::view_service::handle_apply_route(self.clone(), location).await;
            }
            MessageToBackend::OpenWindow {
                window,
                focus_if_exists,
            } => {
                services::window_service::handle_open_window(self.clone(), window, focus_if_exists)
                    .await;
            }
            MessageToBackend::FocusWindow { kind, id } => {
                self.with_store(|store| store.focus_window(kind, &id)).await;
            }
            MessageToBackend::CloseWindow { kind, id } => {
                self.with_store(|store| store.close_window(kind, &id)).await;
            }
            MessageToBackend::CloseAllWindows(kind) => {
                services::window_service::handle_close_all_windows(self.clone(), kind).await;
            }
            MessageToBackend::OpenRoomMemberModal { top, left, is_edit } => {
                self.with_store(|store| store.open_room_member_modal(top, left, is_edit))
                    .await;
            }
            MessageToBackend::CloseRoomMemberModal => {
                self.with_store(|store| store.close_room_member_modal())
                    .await;
            }
            MessageToBackend::SetTotalUnreadCount(count) => {
                self.with_store(|store| store.set_total_unread_count(count))
                    .await;
            }
            MessageToBackend::SetContentRect(rect) => {
                self.with_store(|store| store.set_content_rect(rect)).await;
            }
            MessageToBackend::SelectFriend(friend_id) => {
                self.with_store(|store| store.select_friend(friend_id)).await;
            }
            MessageToBackend::SelectFavoriteFriend(friend_id) => {
                self.with_store(|store| store.select_favorite_friend(friend_id))
                    .await;
            }
            MessageToBackend::ClearFriendSelection => {
                self.with_store(|store| store.clear_friend_selection())
                    .await;
            }
        }
        self.flush_changes().await;
    }

    /// Runs `mutate` against the store under one write guard.
    pub async fn with_store<R>(&self, mutate: impl FnOnce(&mut UiWindowStateStore) -> R) -> R {
        let mut state = self.state.write().await;
        mutate(&mut state.store)
    }

    /// Forwards recorded diffs to the consumer, oldest first.
    async fn flush_changes(&self) {
        let mut changes = self.changes.lock().await;
        while let Ok(change) = changes.try_recv() {
            self.send(MessageFromBackend::StateChanged(change)).await;
        }
    }

    /// Send a message to the consumer. A closed channel only means nobody is
    /// listening any more, so the message is dropped.
    pub async fn send(&self, message: MessageFromBackend) {
        if self.tx.send(message).await.is_err() {
            log::warn!("Consumer channel is closed, dropping message");
        }
    }

    /// Send a notification message to the consumer.
    pub async fn send_notification(
        &self,
        notification_type: NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(NotificationMessage {
            notification_type,
            message: content.into(),
        }))
        .await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use teeplatform_bridge::BridgeChannels;
    use teeplatform_bridge::change::{FriendSelection, Rect};
    use teeplatform_bridge::tags::{AppKind, ResourceType, WindowKind};
    use teeplatform_bridge::window::{WindowHandle, WindowInfo};

    use super::*;

    #[derive(Debug, Default)]
    struct CountingHandle {
        focus_calls: AtomicUsize,
    }

    impl WindowHandle for CountingHandle {
        fn is_alive(&self) -> bool {
            true
        }

        fn focus(&self) {
            self.focus_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Harness {
        context: Arc<AppContext>,
        channels: BridgeChannels,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(config: Config) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let channels = BridgeChannels::new(64);
            let context = Arc::new(AppContext::new(
                config,
                dir.path().join("config.toml"),
                channels.backend_tx.clone(),
            ));
            Self {
                context,
                channels,
                _dir: dir,
            }
        }

        async fn dispatch(&self, message: MessageToBackend) {
            self.context.dispatch_message(message).await;
        }

        fn drain(&mut self) -> Vec<MessageFromBackend> {
            let mut messages = Vec::new();
            while let Ok(message) = self.channels.frontend_rx.try_recv() {
                messages.push(message);
            }
            messages
        }

        fn drain_changes(&mut self) -> Vec<StateChange> {
            self.drain()
                .into_iter()
                .filter_map(|message| match message {
                    MessageFromBackend::StateChanged(change) => Some(change),
                    _ => None,
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn open_window_publishes_then_lists() {
        let mut harness = Harness::new(Config::default());

        harness
            .dispatch(MessageToBackend::OpenWindow {
                window: WindowInfo::new(WindowKind::Meeting, "room-42"),
                focus_if_exists: None,
            })
            .await;
        harness
            .dispatch(MessageToBackend::WindowsRequest(WindowKind::Meeting))
            .await;

        let messages = harness.drain();
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            &messages[0],
            MessageFromBackend::StateChanged(StateChange::WindowOpened { window })
                if window.id == "room-42"
        ));
        match &messages[1] {
            MessageFromBackend::WindowsResponse { kind, windows } => {
                assert_eq!(*kind, WindowKind::Meeting);
                assert_eq!(windows.len(), 1);
                assert!(!windows[0].has_handler);
            }
            other => panic!("expected a windows response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn configured_default_controls_reopen() {
        let mut config = Config::default();
        config.windows.focus_existing = false;
        let mut harness = Harness::new(config);

        for _ in 0..2 {
            harness
                .dispatch(MessageToBackend::OpenWindow {
                    window: WindowInfo::new(WindowKind::Talk, "R1"),
                    focus_if_exists: None,
                })
                .await;
        }

        let opened = harness
            .drain_changes()
            .into_iter()
            .filter(|change| matches!(change, StateChange::WindowOpened { .. }))
            .count();
        assert_eq!(opened, 2);
        let store_count = harness
            .context
            .with_store(|store| store.window_count(WindowKind::Talk))
            .await;
        assert_eq!(store_count, 1);
    }

    #[tokio::test]
    async fn explicit_focus_flag_wins_over_config() {
        let mut harness = Harness::new(Config::default());
        for _ in 0..2 {
            harness
                .dispatch(MessageToBackend::OpenWindow {
                    window: WindowInfo::new(WindowKind::Talk, "R1"),
                    focus_if_exists: Some(false),
                })
                .await;
        }
        assert_eq!(harness.drain_changes().len(), 2);
    }

    #[tokio::test]
    async fn route_changes_arrive_in_mutation_order() {
        let mut harness = Harness::new(Config::default());

        harness
            .dispatch(MessageToBackend::ApplyRoute("/s/room-1/note?sub=drive".to_string()))
            .await;

        assert_eq!(
            harness.drain_changes(),
            vec![
                StateChange::ResourceChanged {
                    resource_type: ResourceType::Room,
                    resource_id: Some("room-1".to_string()),
                },
                StateChange::TabChanged {
                    tab: ResourceType::Room
                },
                StateChange::MainAppChanged { app: AppKind::Note },
                StateChange::SubAppChanged {
                    app: Some(AppKind::Drive)
                },
            ]
        );
    }

    #[tokio::test]
    async fn bad_route_is_reported_and_ignored() {
        let mut harness = Harness::new(Config::default());

        harness
            .dispatch(MessageToBackend::ApplyRoute("/q/room-1".to_string()))
            .await;

        let messages = harness.drain();
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            MessageFromBackend::NotificationMessage(notification) => {
                assert_eq!(notification.notification_type, NotificationType::Warning);
                assert!(notification.message.contains("resource code"));
            }
            other => panic!("expected a notification, got {other:?}"),
        }
        let resource = harness
            .context
            .with_store(|store| store.resource_type())
            .await;
        assert_eq!(resource, ResourceType::None);
    }

    #[tokio::test]
    async fn close_all_only_touches_one_category() {
        let mut harness = Harness::new(Config::default());
        for (kind, id) in [
            (WindowKind::Talk, "t1"),
            (WindowKind::Talk, "t2"),
            (WindowKind::Meeting, "m1"),
        ] {
            harness
                .dispatch(MessageToBackend::OpenWindow {
                    window: WindowInfo::new(kind, id),
                    focus_if_exists: Some(true),
                })
                .await;
        }
        harness.drain();

        harness
            .dispatch(MessageToBackend::CloseAllWindows(WindowKind::Talk))
            .await;
        harness.dispatch(MessageToBackend::SnapshotRequest).await;

        let messages = harness.drain();
        let closed = messages
            .iter()
            .filter(|message| {
                matches!(
                    message,
                    MessageFromBackend::StateChanged(StateChange::WindowClosed {
                        kind: WindowKind::Talk,
                        ..
                    })
                )
            })
            .count();
        assert_eq!(closed, 2);
        match messages.last() {
            Some(MessageFromBackend::SnapshotResponse(snapshot)) => {
                assert!(snapshot.talk_windows.is_empty());
                assert_eq!(snapshot.meeting_windows.len(), 1);
            }
            other => panic!("expected a snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sub_app_state_is_forwarded() {
        let mut harness = Harness::new(Config::default());
        let state = serde_json::json!({ "meeting": "stopped" });

        harness
            .dispatch(MessageToBackend::SetSubAppState(Some(state.clone())))
            .await;

        assert_eq!(
            harness.drain_changes(),
            vec![StateChange::SubAppStateChanged { state: Some(state) }]
        );
    }

    #[tokio::test]
    async fn updated_config_is_saved_and_echoed() {
        let mut harness = Harness::new(Config::default());
        let mut config = Config::default();
        config.startup.main_app = AppKind::Calendar;

        harness
            .dispatch(MessageToBackend::UpdateConfiguration(config))
            .await;

        let messages = harness.drain();
        assert!(matches!(
            messages.as_slice(),
            [MessageFromBackend::ConfigurationResponse(config)]
                if config.startup.main_app == AppKind::Calendar
        ));
        let path = harness.context.state.read().await.config_path.clone();
        let saved = crate::config::load_config_from(&path).await.unwrap();
        assert_eq!(saved.startup.main_app, AppKind::Calendar);
        // the running store keeps its startup panes
        let main_app = harness.context.with_store(|store| store.main_app()).await;
        assert_eq!(main_app, AppKind::Talk);
    }

    #[tokio::test]
    async fn focus_window_reaches_the_handle() {
        let mut harness = Harness::new(Config::default());
        let handle = Arc::new(CountingHandle::default());
        harness
            .dispatch(MessageToBackend::OpenWindow {
                window: WindowInfo::new(WindowKind::Meeting, "room-7").with_handler(handle.clone()),
                focus_if_exists: None,
            })
            .await;
        harness.drain();

        harness
            .dispatch(MessageToBackend::FocusWindow {
                kind: WindowKind::Meeting,
                id: "room-7".to_string(),
            })
            .await;
        harness
            .dispatch(MessageToBackend::FocusWindow {
                kind: WindowKind::Meeting,
                id: "room-8".to_string(),
            })
            .await;

        assert_eq!(handle.focus_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            harness.drain_changes(),
            vec![StateChange::WindowFocused {
                kind: WindowKind::Meeting,
                id: "room-7".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn content_rect_is_published_and_snapshotted() {
        let mut harness = Harness::new(Config::default());
        let rect = Rect {
            top: 48.0,
            left: 72.0,
            width: 1280.0,
            height: 720.0,
        };

        harness
            .dispatch(MessageToBackend::SetContentRect(Some(rect)))
            .await;
        harness
            .dispatch(MessageToBackend::SetContentRect(Some(rect)))
            .await;
        harness.dispatch(MessageToBackend::SnapshotRequest).await;

        let messages = harness.drain();
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            &messages[0],
            MessageFromBackend::StateChanged(StateChange::ContentRectChanged { rect: Some(r) })
                if *r == rect
        ));
        assert!(matches!(
            &messages[1],
            MessageFromBackend::SnapshotResponse(snapshot) if snapshot.content_rect == Some(rect)
        ));
    }

    #[tokio::test]
    async fn clearing_friend_selection_resets_both_lists() {
        let mut harness = Harness::new(Config::default());
        harness
            .dispatch(MessageToBackend::SelectFavoriteFriend(Some("u2".to_string())))
            .await;
        harness.drain();

        harness.dispatch(MessageToBackend::ClearFriendSelection).await;
        harness.dispatch(MessageToBackend::ClearFriendSelection).await;

        assert_eq!(
            harness.drain_changes(),
            vec![StateChange::FriendSelectionChanged {
                selection: FriendSelection::default(),
            }]
        );
    }

    #[tokio::test]
    async fn snapshot_carries_app_inputs() {
        let mut harness = Harness::new(Config::default());
        harness
            .dispatch(MessageToBackend::ApplyRoute("/s/room-3/drive".to_string()))
            .await;
        harness.drain();

        harness.dispatch(MessageToBackend::SnapshotRequest).await;

        match harness.drain().as_slice() {
            [MessageFromBackend::SnapshotResponse(snapshot)] => {
                assert_eq!(snapshot.app_inputs.room_id.as_deref(), Some("room-3"));
                assert_eq!(snapshot.app_inputs.channel_type.as_deref(), Some("CHN0006"));
                assert_eq!(snapshot.pane_split, (75, 25));
                assert_eq!(snapshot.location.as_deref(), Some("/s/room-3/drive"));
            }
            other => panic!("expected a snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn consumer_hangup_does_not_stop_dispatch() {
        let harness = Harness::new(Config::default());
        let Harness {
            context,
            channels,
            _dir,
        } = harness;
        drop(channels);

        context
            .dispatch_message(MessageToBackend::SetTotalUnreadCount(5))
            .await;

        let count = context
            .with_store(|store| store.total_unread_count())
            .await;
        assert_eq!(count, 5);
    }
}
