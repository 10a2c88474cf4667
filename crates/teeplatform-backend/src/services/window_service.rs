use teeplatform_bridge::MessageFromBackend;
use teeplatform_bridge::tags::WindowKind;
use teeplatform_bridge::window::{WindowInfo, WindowSummary};

/// Handles a window open request (see
/// [`teeplatform_bridge::MessageToBackend::OpenWindow`]). Requests that do
/// not say whether to focus an existing entry use the configured default.
pub async fn handle_open_window(
    context: super::AppContextHandle,
    window: WindowInfo,
    focus_if_exists: Option<bool>,
) {
    let mut state = context.state.write().await;
    let focus_if_exists = focus_if_exists.unwrap_or(state.config.windows.focus_existing);
    log::info!(
        "Opening {} window {} (focus if exists: {focus_if_exists})",
        window.kind,
        window.id
    );
    state.store.open_window(window, focus_if_exists);
}

/// Handles a request to close every window of one category.
pub async fn handle_close_all_windows(context: super::AppContextHandle, kind: WindowKind) {
    let closed = {
        let mut state = context.state.write().await;
        let count = state.store.window_count(kind);
        state.store.close_all_windows(kind);
        count
    };
    log::info!("Closed {closed} {kind} window(-s)");
}

/// Handles an incoming windows list request (see
/// [`teeplatform_bridge::MessageToBackend::WindowsRequest`]).
pub async fn handle_windows_request(context: super::AppContextHandle, kind: WindowKind) {
    let windows: Vec<WindowSummary> = {
        let state = context.state.read().await;
        state
            .store
            .get_windows(kind)
            .iter()
            .map(WindowInfo::summary)
            .collect()
    };
    context
        .send(MessageFromBackend::WindowsResponse { kind, windows })
        .await;
}
