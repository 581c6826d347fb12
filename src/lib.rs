//! Virtual joystick component
//!
//! A two-element on-screen joystick: a ring and a handle that follows the
//! pointer, clamped to the ring. Dragging reports angle, 8-way direction and
//! power. Drawing and input dispatch stay with the host through the traits in
//! [`host`]; the crate ships an egui host in [`visualizer`].

pub mod config;
pub mod geometry;
pub mod host;
pub mod joystick;
pub mod replay;
pub mod visualizer;

pub use config::{ConfigWatcher, JoystickConfig};
pub use geometry::{Direction, Point, Scale};
pub use host::{Color, CoordinateSpace, Cursor, Drawable, Ellipse, PointerEvent, Scene, ShapeFactory};
pub use joystick::{Joystick, JoystickChange, JoystickEvent, JoystickSettings};
