// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node Editor - direct-manipulation node graph editor
//!
//! Opens a single window holding the editor canvas:
//! - Drag from an output slot to another node's input slot to link them
//! - Click a node to bring it to the front
//! - Middle-drag to pan, right-click for the context menu
//!
//! ## Configuration
//!
//! Visual settings are read from `nodedit.ron` in the working directory, or
//! from the file named by `NODEDIT_CONFIG`. A missing file means defaults.

mod app;
mod surface;

use app::NodeEditApp;
use nodedit_graph::config::CONFIG_FILE_NAME;
use nodedit_graph::EditorConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable naming an alternative configuration file
const CONFIG_ENV: &str = "NODEDIT_CONFIG";

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("nodedit_app=debug".parse().unwrap())
        .add_directive("nodedit_graph=debug".parse().unwrap())
        .add_directive("wgpu=warn".parse().unwrap())
        .add_directive("naga=warn".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Node Editor v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = NodeEditApp::run(load_config()) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}

fn load_config() -> EditorConfig {
    let path = std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), PathBuf::from);

    match EditorConfig::load(&path) {
        Ok(config) => {
            tracing::info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) if e.is_not_found() => {
            tracing::info!("No configuration at {}, using defaults", path.display());
            EditorConfig::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring configuration at {}: {e}", path.display());
            EditorConfig::default()
        }
    }
}
