//! Low-level drawing primitives for the joystick visualizer
//!
//! Contains the egui-backed [`Scene`] used to paint [`Ellipse`] drawables, plus
//! helpers for crosshairs, sector guides and the handle trail.

use egui::{Color32, Painter, Pos2, Stroke};
use std::f32::consts::{FRAC_PI_8, TAU};

use crate::geometry::{sector_center, Direction, Point};
use crate::host::{Color, Drawable, Ellipse, Scene};

/// Segments used to approximate an ellipse outline
const ELLIPSE_SEGMENTS: usize = 64;

/// Paints joystick children onto an egui painter.
///
/// Joystick positions are egui screen points, so no extra transform applies.
pub struct EguiScene<'a> {
    painter: &'a Painter,
}

impl<'a> EguiScene<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl Scene<Ellipse> for EguiScene<'_> {
    fn paint(&mut self, element: &Ellipse, origin: Point) {
        let (width, height) = element.scaled_size();
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let top_left = origin + element.position();
        let center = egui::pos2(top_left.x + width / 2.0, top_left.y + height / 2.0);
        let points = ellipse_points(center, width / 2.0, height / 2.0, ELLIPSE_SEGMENTS);

        self.painter.add(egui::Shape::convex_polygon(
            points,
            to_color32(element.fill, element.opacity()),
            Stroke::NONE,
        ));
    }
}

/// Outline points of an axis-aligned ellipse, counter-clockwise on screen.
pub fn ellipse_points(center: Pos2, radius_x: f32, radius_y: f32, segments: usize) -> Vec<Pos2> {
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * TAU;
            egui::pos2(center.x + radius_x * t.cos(), center.y + radius_y * t.sin())
        })
        .collect()
}

/// Convert a fill color and opacity into an egui color.
pub fn to_color32(fill: Color, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(fill.r, fill.g, fill.b, alpha)
}

pub fn to_pos2(point: Point) -> Pos2 {
    egui::pos2(point.x, point.y)
}

pub fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

/// Draw a center crosshair on the painter
pub fn draw_crosshair(painter: &Painter, center: Pos2, size: f32, color: Color32) {
    painter.line_segment(
        [
            egui::pos2(center.x - size, center.y),
            egui::pos2(center.x + size, center.y),
        ],
        Stroke::new(1.0, color),
    );
    painter.line_segment(
        [
            egui::pos2(center.x, center.y - size),
            egui::pos2(center.x, center.y + size),
        ],
        Stroke::new(1.0, color),
    );
}

/// Draw the 8 direction sector boundaries (odd multiples of π/8)
pub fn draw_sector_guides(painter: &Painter, center: Pos2, radius: f32, color: Color32) {
    for k in 0..8 {
        let rad = (2 * k + 1) as f32 * FRAC_PI_8;
        let end = egui::pos2(center.x + radius * rad.cos(), center.y + radius * rad.sin());
        painter.line_segment([center, end], Stroke::new(1.0, color));
    }
    painter.circle_stroke(center, radius, Stroke::new(1.0, color));
}

/// Highlight the sector of the current direction with a spoke along its center
pub fn draw_active_sector(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    direction: Direction,
    color: Color32,
) {
    let rad = sector_center(direction);
    let end = egui::pos2(center.x + radius * rad.cos(), center.y + radius * rad.sin());
    painter.line_segment([center, end], Stroke::new(3.0, color));
}

/// Draw a trail as a polyline from stored points
pub fn draw_trail(painter: &Painter, points: &[Point], color: Color32) {
    if points.len() < 2 {
        return;
    }

    let screen_points: Vec<Pos2> = points.iter().copied().map(to_pos2).collect();
    painter.add(egui::Shape::line(screen_points, Stroke::new(1.5, color)));
}

/// Get color based on power (green at full deflection, yellow otherwise, gray when small)
pub fn power_color(power: f32) -> Color32 {
    if power > 0.95 {
        Color32::from_rgb(100, 255, 100)
    } else if power > 0.1 {
        Color32::from_rgb(255, 200, 100)
    } else {
        Color32::from_gray(150)
    }
}
