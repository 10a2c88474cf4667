//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to bridge commands.

use std::path::PathBuf;
use std::{sync::Arc, thread};

use teeplatform_bridge::config::Config;
use teeplatform_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::app::AppContext;
use crate::config::ConfigError;

/// Loads the configuration from `config_path`, falling back to defaults when
/// it cannot be read. A resolved path is kept even then, so the next save
/// replaces the broken file. Only when no config directory exists at all is
/// the config kept next to the working directory.
async fn load_or_default(config_path: Result<PathBuf, ConfigError>) -> (Config, PathBuf) {
    let config_path = match config_path {
        Ok(path) => path,
        Err(e) => {
            log::error!("Failed to resolve config path, falling back to defaults: {e}");
            return (Config::default(), PathBuf::from("config.toml"));
        }
    };

    match crate::config::load_config_from(&config_path).await {
        Ok(config) => (config, config_path),
        Err(e) => {
            log::error!(
                "Failed to load config from {config_path:?}, falling back to defaults: {e}"
            );
            (Config::default(), config_path)
        }
    }
}

/// Initialize backend state and start processing bridge commands.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let (config, config_path) = load_or_default(crate::config::default_config_path()).await;

    let context = Arc::new(AppContext::new(config, config_path, tx));
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge commands. The
/// returned handle finishes once the command channel is closed.
pub fn run(
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to build tokio runtime: {e}");
                return;
            }
        };
        runtime.block_on(async { setup_backend(rx, tx).await });
    })
}
