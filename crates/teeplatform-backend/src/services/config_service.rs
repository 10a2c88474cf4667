use teeplatform_bridge::MessageFromBackend;
use teeplatform_bridge::config::Config;
use teeplatform_bridge::notification::NotificationType;

/// Handles an incoming configuration request (see
/// [`teeplatform_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}

/// Handles a configuration update and persists it to disk. The in-memory
/// config is replaced even if saving fails, and the failure is reported as
/// an error notification.
pub async fn handle_update_config(context: super::AppContextHandle, config: Config) {
    let config_path = {
        let mut state = context.state.write().await;
        state.config = config.clone();
        state.config_path.clone()
    };

    match crate::config::save_config(&config, &config_path).await {
        Ok(()) => log::info!("Saved configuration to {config_path:?}"),
        Err(e) => {
            log::error!("Failed to save configuration to {config_path:?}: {e}");
            context
                .send_notification(NotificationType::Error, e.to_string())
                .await;
        }
    }

    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}
