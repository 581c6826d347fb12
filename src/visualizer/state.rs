//! State structures for the joystick visualizer
//!
//! Tracks the readout shown next to the joysticks, the handle trail and the
//! translation of egui's per-frame pointer state into discrete pointer events.

use std::collections::VecDeque;

use crate::geometry::{Direction, Point};
use crate::host::{PointerEvent, PointerId};
use crate::joystick::JoystickEvent;

/// Maximum number of handle positions kept in a trail
pub const TRAIL_CAPACITY: usize = 120;

/// Values shown in the readout panel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readout {
    pub active: bool,
    pub angle: f32,
    pub direction: Option<Direction>,
    pub power: f32,
}

impl Readout {
    /// Fold a joystick event into the readout; a drag end resets it.
    pub fn apply(&mut self, event: &JoystickEvent) {
        match event {
            JoystickEvent::Start => self.active = true,
            JoystickEvent::Change(change) => {
                self.angle = change.angle;
                self.direction = Some(change.direction);
                self.power = change.power;
            },
            JoystickEvent::End => *self = Readout::default(),
        }
    }

    pub fn angle_text(&self) -> String {
        format!("Angle: {:.0}°", self.angle)
    }

    pub fn direction_text(&self) -> String {
        match self.direction {
            Some(direction) => format!("Direction: {}", direction),
            None => "Direction: -".to_string(),
        }
    }

    pub fn power_text(&self) -> String {
        format!("Power: {:.2}", self.power)
    }
}

/// Recent handle centers in screen coordinates
#[derive(Debug, Clone, Default)]
pub struct HandleTrail {
    points: VecDeque<Point>,
}

impl HandleTrail {
    pub fn add_point(&mut self, point: Point) {
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> Vec<Point> {
        self.points.iter().copied().collect()
    }
}

/// Turns "button held on this widget + pointer position" samples into
/// down/move/up events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed: bool,
    last: Option<Point>,
}

impl PointerTracker {
    /// Feed one frame of pointer state.
    ///
    /// Moves are only reported when the position changed since the last event.
    pub fn update(&mut self, held: bool, position: Option<Point>) -> Vec<PointerEvent> {
        let pointer = PointerId::default();
        let mut events = Vec::new();

        match (self.pressed, held, position) {
            (false, true, Some(pos)) => {
                events.push(PointerEvent::down(pos).with_pointer(pointer));
                events.push(PointerEvent::moved(pos).with_pointer(pointer));
                self.pressed = true;
                self.last = Some(pos);
            },
            (true, true, Some(pos)) if self.last != Some(pos) => {
                events.push(PointerEvent::moved(pos).with_pointer(pointer));
                self.last = Some(pos);
            },
            (true, false, _) => {
                let pos = position.or(self.last).unwrap_or(Point::ZERO);
                events.push(PointerEvent::up(pos).with_pointer(pointer));
                self.pressed = false;
                self.last = None;
            },
            _ => {},
        }

        events
    }
}
