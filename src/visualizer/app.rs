//! Main application struct for the joystick visualizer.
//!
//! [`JoystickVisualizerApp`] implements `eframe::App`. Each frame it turns
//! egui's pointer state into [`PointerEvent`](crate::host::PointerEvent)s,
//! routes them through every joystick panel and paints the result with the
//! helpers from [`super::drawing`].

use anyhow::Result;
use egui::{Color32, RichText};
use tracing::{debug, info, warn};

use super::drawing::{
    draw_active_sector, draw_crosshair, draw_sector_guides, draw_trail, power_color, to_point,
    to_pos2, EguiScene,
};
use super::state::{HandleTrail, PointerTracker, Readout};
use crate::config::{ConfigWatcher, JoystickConfig};
use crate::geometry::Point;
use crate::host::{Color, Cursor, Drawable, Ellipse};
use crate::joystick::{Joystick, JoystickEvent, JoystickSettings};

/// Outer diameter of the styled demo joystick
const STYLED_OUTER_SIZE: f32 = 150.0;
/// Handle diameter relative to the styled ring
const STYLED_INNER_RATIO: f32 = 0.53;

/// One joystick with its own trail, readout and pointer tracking
struct JoystickPanel {
    label: String,
    joystick: Joystick<Ellipse>,
    readout: Readout,
    trail: HandleTrail,
    tracker: PointerTracker,
}

impl JoystickPanel {
    fn new(label: &str, settings: JoystickSettings<Ellipse>) -> Self {
        Self {
            label: label.to_string(),
            joystick: Joystick::new(with_logging(label, settings)),
            readout: Readout::default(),
            trail: HandleTrail::default(),
            tracker: PointerTracker::default(),
        }
    }

    /// Global center of the handle
    fn handle_center(&self) -> Point {
        let inner = self.joystick.inner();
        let (width, height) = inner.scaled_size();
        self.joystick.position() + inner.position() + Point::new(width / 2.0, height / 2.0)
    }

    fn apply(&mut self, event: JoystickEvent) {
        match event {
            JoystickEvent::Start => self.trail.clear(),
            JoystickEvent::Change(_) => {
                let center = self.handle_center();
                self.trail.add_point(center);
            },
            JoystickEvent::End => {},
        }
        self.readout.apply(&event);
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(&self.label).strong().size(14.0));

        let (width, height) = self.joystick.size();
        let (rect, mut response) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click_and_drag());
        if self.joystick.cursor() == Cursor::Pointer {
            response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
        }

        self.joystick.set_position(to_point(rect.min));

        let held = response.is_pointer_button_down_on();
        let position = ui.input(|i| i.pointer.latest_pos()).map(to_point);
        for event in self.tracker.update(held, position) {
            if let Some(emitted) = self.joystick.handle(event) {
                self.apply(emitted);
            }
        }

        // Handle may leave the allocated rect, so paint unclipped
        let painter = ui.ctx().layer_painter(ui.layer_id());
        draw_sector_guides(
            &painter,
            rect.center(),
            self.joystick.outer_radius(),
            Color32::from_gray(70),
        );
        if let Some(direction) = self.readout.direction {
            draw_active_sector(
                &painter,
                rect.center(),
                self.joystick.outer_radius(),
                direction,
                Color32::from_rgb(150, 200, 255),
            );
        }
        self.joystick.render(&mut EguiScene::new(&painter));
        draw_crosshair(&painter, rect.center(), 4.0, Color32::from_gray(120));
        if self.readout.active {
            draw_trail(&painter, &self.trail.points(), Color32::from_rgb(255, 100, 100));
            painter.circle_filled(
                to_pos2(self.handle_center()),
                2.5,
                Color32::from_rgb(255, 100, 100),
            );
        }

        ui.add_space(8.0);
        ui.label(RichText::new(self.readout.angle_text()).monospace());
        ui.label(RichText::new(self.readout.direction_text()).monospace());
        ui.label(
            RichText::new(self.readout.power_text())
                .monospace()
                .color(power_color(self.readout.power)),
        );
    }
}

/// Attach tracing callbacks tagged with the panel label
fn with_logging(label: &str, settings: JoystickSettings<Ellipse>) -> JoystickSettings<Ellipse> {
    let (start, change, end) = (label.to_string(), label.to_string(), label.to_string());
    settings
        .on_start(move || info!("[{}] drag start", start))
        .on_change(move |c| {
            debug!(
                "[{}] angle={:.1} direction={} power={:.2}",
                change, c.angle, c.direction, c.power
            )
        })
        .on_end(move || info!("[{}] drag end", end))
}

/// Ring and handle with custom fills, the handle sized relative to the ring
fn styled_settings() -> JoystickSettings<Ellipse> {
    let inner_size = STYLED_OUTER_SIZE * STYLED_INNER_RATIO;
    JoystickSettings::new()
        .outer(
            Ellipse::new(STYLED_OUTER_SIZE, STYLED_OUTER_SIZE)
                .with_fill(Color::rgb(60, 120, 216))
                .with_opacity(0.4),
        )
        .inner(
            Ellipse::new(inner_size, inner_size)
                .with_fill(Color::rgb(240, 240, 240))
                .with_opacity(0.5),
        )
}

/// Visualizer application: the configured joystick next to a styled one.
pub struct JoystickVisualizerApp {
    panels: Vec<JoystickPanel>,
    watcher: Option<ConfigWatcher>,
}

impl JoystickVisualizerApp {
    pub fn new(config: &JoystickConfig, watcher: Option<ConfigWatcher>) -> Result<Self> {
        Ok(Self {
            panels: vec![
                JoystickPanel::new("Configured", config.to_settings()?),
                JoystickPanel::new("Styled", styled_settings()),
            ],
            watcher,
        })
    }

    /// Rebuild the configured joystick when the config file changed.
    fn poll_config(&mut self) {
        let Some(config) = self.watcher.as_ref().and_then(|w| w.try_next()) else {
            return;
        };

        match config.to_settings() {
            Ok(settings) => {
                info!("Applying reloaded joystick configuration");
                self.panels[0] = JoystickPanel::new("Configured", settings);
            },
            Err(e) => warn!("Ignoring reloaded config: {:#}", e),
        }
    }
}

impl eframe::App for JoystickVisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_config();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("Virtual Joystick").size(20.0).strong());
            ui.label(
                RichText::new("Drag a handle; release to recenter")
                    .color(Color32::from_gray(180))
                    .size(12.0),
            );
            if self.watcher.is_some() {
                ui.label(
                    RichText::new("Watching config file for changes")
                        .color(Color32::from_rgb(150, 150, 200))
                        .size(11.0),
                );
            }

            ui.add_space(24.0);

            ui.horizontal_top(|ui| {
                for panel in &mut self.panels {
                    ui.vertical(|ui| {
                        ui.set_min_width(panel.joystick.size().0.max(160.0));
                        panel.show(ui);
                    });
                    ui.add_space(48.0);
                }
            });
        });

        ctx.request_repaint();
    }
}
