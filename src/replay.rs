//! Headless drag scripts
//!
//! Replays a recorded sequence of pointer events against a joystick and
//! reports what the component emitted after each one. Used by the `--replay`
//! CLI mode and handy for reproducing edge cases without a window.
//!
//! Script format (YAML, global coordinates):
//!
//! ```yaml
//! events:
//!   - { kind: down, x: 110, y: 110 }
//!   - { kind: move, x: 130, y: 110 }
//!   - { kind: move, x: 300, y: 300, pointer: 1 }
//!   - { kind: up, x: 300, y: 300 }
//! ```
//!
//! Pointer-downs outside the joystick's bounds are not delivered, the same as
//! a host hit-test would do.

use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::geometry::Point;
use crate::host::{Drawable, PointerEvent, PointerId, PointerKind};
use crate::joystick::{Joystick, JoystickEvent};

/// Scripted pointer event
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScriptedPointer {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub pointer: u64,
}

impl ScriptedPointer {
    pub fn to_event(&self) -> PointerEvent {
        PointerEvent {
            kind: self.kind,
            pointer: PointerId(self.pointer),
            position: Point::new(self.x, self.y),
        }
    }
}

/// Sequence of pointer events to replay
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub events: Vec<ScriptedPointer>,
}

/// Outcome of one scripted event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub input: PointerEvent,
    /// False when the host hit-test rejected the event
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitted: Option<JoystickEvent>,
    /// Handle position relative to the joystick after the event
    pub handle: Point,
    pub handle_opacity: f32,
    pub dragging: bool,
}

impl ReplayScript {
    /// Load a script from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse replay script: {}", path.display()))
    }

    /// Feed every event to `joystick`, recording one step per event
    pub fn run<E: Drawable>(&self, joystick: &mut Joystick<E>) -> Vec<ReplayStep> {
        self.events
            .iter()
            .enumerate()
            .map(|(index, scripted)| {
                let input = scripted.to_event();
                let delivered =
                    input.kind != PointerKind::Down || joystick.contains(input.position);
                let emitted = if delivered {
                    joystick.handle(input)
                } else {
                    debug!("Pointer-down at {:?} outside joystick bounds", input.position);
                    None
                };

                ReplayStep {
                    index,
                    input,
                    delivered,
                    emitted,
                    handle: joystick.inner().position(),
                    handle_opacity: joystick.inner().opacity(),
                    dragging: joystick.is_dragging(),
                }
            })
            .collect()
    }
}

impl ReplayStep {
    /// Single JSON line for machine consumption
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize replay step")
    }

    /// Human-readable table row
    pub fn to_table_row(&self) -> String {
        let kind = match self.input.kind {
            PointerKind::Down => "DOWN".green(),
            PointerKind::Move => "MOVE".normal(),
            PointerKind::Up => "UP  ".red(),
        };

        let outcome = match (&self.emitted, self.delivered) {
            (_, false) => "missed (outside bounds)".dimmed().to_string(),
            (None, true) => "-".dimmed().to_string(),
            (Some(JoystickEvent::Start), _) => "start".bold().to_string(),
            (Some(JoystickEvent::End), _) => "end".bold().to_string(),
            (Some(JoystickEvent::Change(change)), _) => format!(
                "angle={:6.1}° direction={:<12} power={:.2}",
                change.angle,
                change.direction.to_string().cyan(),
                change.power
            ),
        };

        format!(
            "{:>4}  {} ({:7.1}, {:7.1})  handle=({:6.1}, {:6.1})  {}",
            self.index,
            kind,
            self.input.position.x,
            self.input.position.y,
            self.handle.x,
            self.handle.y,
            outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::host::Ellipse;
    use crate::joystick::{JoystickSettings, ACTIVE_OPACITY, STANDBY_OPACITY};
    use tempfile::NamedTempFile;

    const SCRIPT: &str = r#"
events:
  - { kind: down, x: 110, y: 110 }
  - { kind: move, x: 120, y: 110 }
  - { kind: move, x: 110, y: 110 }
  - { kind: move, x: 210, y: 210 }
  - { kind: up, x: 210, y: 210 }
  - { kind: up, x: 210, y: 210 }
"#;

    fn joystick_at_50() -> Joystick<Ellipse> {
        let mut joystick = Joystick::new(JoystickSettings::new());
        joystick.set_position(Point::new(50.0, 50.0));
        joystick
    }

    #[test]
    fn test_replay_full_drag() {
        let script: ReplayScript = serde_yaml::from_str(SCRIPT).unwrap();
        let mut joystick = joystick_at_50();

        let steps = script.run(&mut joystick);
        assert_eq!(steps.len(), 6);

        assert_eq!(steps[0].emitted, Some(JoystickEvent::Start));
        assert_eq!(steps[0].handle_opacity, ACTIVE_OPACITY);

        let Some(JoystickEvent::Change(right)) = steps[1].emitted else {
            panic!("expected change, got {:?}", steps[1].emitted);
        };
        assert_eq!(right.direction, Direction::Right);

        // Back on the ring center: nothing emitted, handle stays put
        assert_eq!(steps[2].emitted, None);
        assert_eq!(steps[2].handle, steps[1].handle);

        let Some(JoystickEvent::Change(far)) = steps[3].emitted else {
            panic!("expected change, got {:?}", steps[3].emitted);
        };
        assert_eq!(far.direction, Direction::BottomRight);
        assert!((far.power - 1.0).abs() < 1e-4);

        assert_eq!(steps[4].emitted, Some(JoystickEvent::End));
        assert_eq!(steps[4].handle, Point::new(25.0, 25.0));
        assert_eq!(steps[4].handle_opacity, STANDBY_OPACITY);
        assert!(!steps[4].dragging);

        // Second up is a no-op
        assert_eq!(steps[5].emitted, None);
    }

    #[test]
    fn test_replay_down_outside_bounds_is_not_delivered() {
        let script: ReplayScript = serde_yaml::from_str(
            "events:\n  - { kind: down, x: 5, y: 5 }\n  - { kind: move, x: 130, y: 110 }\n",
        )
        .unwrap();
        let mut joystick = joystick_at_50();

        let steps = script.run(&mut joystick);
        assert!(!steps[0].delivered);
        assert_eq!(steps[0].emitted, None);
        assert_eq!(steps[1].emitted, None);
        assert!(!joystick.is_dragging());
    }

    #[test]
    fn test_replay_json_line() {
        let script: ReplayScript = serde_yaml::from_str(SCRIPT).unwrap();
        let mut joystick = joystick_at_50();
        let steps = script.run(&mut joystick);

        let line = steps[0].to_json_line().unwrap();
        assert!(line.contains(r#""emitted":{"event":"start"}"#));
        assert!(line.contains(r#""kind":"down""#));

        let idle = steps[5].to_json_line().unwrap();
        assert!(!idle.contains("emitted"));
    }

    #[test]
    fn test_load_script_file() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs::write(file.path(), SCRIPT)?;

        let script = ReplayScript::load(file.path())?;
        assert_eq!(script.events.len(), 6);
        assert_eq!(script.events[0].kind, PointerKind::Down);
        assert_eq!(script.events[0].pointer, 0);
        Ok(())
    }

    #[test]
    fn test_table_row_mentions_direction() {
        colored::control::set_override(false);
        let script: ReplayScript = serde_yaml::from_str(SCRIPT).unwrap();
        let mut joystick = joystick_at_50();
        let steps = script.run(&mut joystick);

        assert!(steps[1].to_table_row().contains("direction=right"));
        assert!(steps[4].to_table_row().contains("end"));
    }
}
