//! Host-framework capabilities consumed by the joystick.
//!
//! The joystick does not draw or dispatch input on its own. It relies on:
//!
//! - [`Drawable`]: an element with intrinsic size, scale, position and opacity
//! - [`ShapeFactory`]: a way to build the default ellipse elements
//! - [`CoordinateSpace`]: global to component-local coordinate conversion
//! - [`Scene`]: a container the component paints its children into
//! - [`PointerEvent`]: down/move/up events carrying a global position
//!
//! [`Ellipse`] is the crate's own retained drawable, used by the defaults, the
//! configuration layer and the egui visualizer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{Point, Scale};

/// Drawable element owned by the joystick.
pub trait Drawable {
    /// Intrinsic (unscaled) width
    fn width(&self) -> f32;
    /// Intrinsic (unscaled) height
    fn height(&self) -> f32;

    fn scale(&self) -> Scale;
    fn set_scale(&mut self, scale: Scale);

    /// Top-left corner relative to the owning component
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);

    /// Intrinsic size multiplied by the current scale, per axis.
    fn scaled_size(&self) -> (f32, f32) {
        let scale = self.scale();
        (self.width() * scale.x, self.height() * scale.y)
    }
}

/// Builds default elements when the caller supplies none.
pub trait ShapeFactory: Drawable + Sized {
    fn ellipse(width: f32, height: f32, fill: Color, opacity: f32) -> Self;
}

/// Converts a global pointer position into component-local coordinates.
pub trait CoordinateSpace {
    fn to_local(&self, global: Point) -> Point;
}

/// Plain translation: local = global - origin.
impl CoordinateSpace for Point {
    fn to_local(&self, global: Point) -> Point {
        global - *self
    }
}

/// Container capability the joystick renders its children into.
///
/// `origin` is the global position of the owning component; the element's own
/// position is relative to it.
pub trait Scene<E: ?Sized> {
    fn paint(&mut self, element: &E, origin: Point);
}

/// Pointer affordance shown while hovering the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Identifier the host assigns to a pointer (mouse or touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

/// Pointer event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event as delivered by the host, in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    #[serde(default)]
    pub pointer: PointerId,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(position: Point) -> Self {
        Self { kind: PointerKind::Down, pointer: PointerId::default(), position }
    }

    pub fn moved(position: Point) -> Self {
        Self { kind: PointerKind::Move, pointer: PointerId::default(), position }
    }

    pub fn up(position: Point) -> Self {
        Self { kind: PointerKind::Up, pointer: PointerId::default(), position }
    }

    /// Same event attributed to another pointer.
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }
}

/// Opaque RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            anyhow::bail!("Color '{}' must have the form #rrggbb", hex);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("Invalid hex digits in color '{}'", hex))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Retained ellipse element.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: Scale,
}

impl Ellipse {
    /// Black, fully opaque ellipse at the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fill: Color::BLACK,
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: Scale::default(),
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Drawable for Ellipse {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn scale(&self) -> Scale {
        self.scale
    }

    fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

impl ShapeFactory for Ellipse {
    fn ellipse(width: f32, height: f32, fill: Color, opacity: f32) -> Self {
        Ellipse::new(width, height)
            .with_fill(fill)
            .with_opacity(opacity)
    }
}
