//! Joystick Visualizer - Native GUI for dragging the joystick around
//!
//! Hosts the configured joystick and a styled variant in an egui window, with
//! live angle/direction/power readouts and a trail of the handle's path.

mod app;
pub mod drawing;
mod state;

pub use app::JoystickVisualizerApp;

use anyhow::Result;

use crate::config::{ConfigWatcher, JoystickConfig};

/// Entry point for the visualizer
///
/// Blocks until the window is closed. With a `watcher`, edits to the config
/// file rebuild the configured joystick live.
pub fn run_visualizer(config: JoystickConfig, watcher: Option<ConfigWatcher>) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Virtual Joystick")
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    let app = JoystickVisualizerApp::new(&config, watcher)?;

    eframe::run_native(
        "Virtual Joystick",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Visualizer failed: {}", e))
}
