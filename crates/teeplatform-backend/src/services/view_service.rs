use teeplatform_bridge::MessageFromBackend;
use teeplatform_bridge::notification::NotificationType;
use teeplatform_store::Route;

/// Handles a router location change (see
/// [`teeplatform_bridge::MessageToBackend::ApplyRoute`]). Unparseable
/// locations leave the state untouched and are reported back as a warning.
pub async fn handle_apply_route(context: super::AppContextHandle, location: String) {
    match Route::parse(&location) {
        Ok(route) => context.with_store(|store| store.apply_route(&route)).await,
        Err(e) => {
            log::warn!("Ignoring route {location:?}: {e}");
            context
                .send_notification(NotificationType::Warning, e.to_string())
                .await;
        }
    }
}

/// Handles an incoming snapshot request (see
/// [`teeplatform_bridge::MessageToBackend::SnapshotRequest`]).
pub async fn handle_snapshot_request(context: super::AppContextHandle) {
    let snapshot = {
        let state = context.state.read().await;
        state.store.snapshot()
    };
    context
        .send(MessageFromBackend::SnapshotResponse(snapshot))
        .await;
}
