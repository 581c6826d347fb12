//! Virtual joystick component
//!
//! Owns an outer ring and an inner handle, tracks the drag lifecycle and turns
//! pointer positions into `(angle, direction, power)` triples.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --down--> Dragging --move--> Dragging --up--> Idle
//! ```
//!
//! Moves and ups while idle are ignored. Every handler runs synchronously on
//! the host's event dispatch; there is no background work.
//!
//! # Radii
//!
//! `outer_radius` is the scaled outer width divided by 2.5 while
//! `inner_radius` is the scaled inner width divided by 2, so the handle's
//! travel stops short of the ring's drawn edge.

mod settings;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::{self, Direction, Point, Scale};
use crate::host::{
    Color, CoordinateSpace, Cursor, Drawable, PointerEvent, PointerId, PointerKind, Scene,
    ShapeFactory,
};

use settings::Callbacks;
pub use settings::{ChangeCallback, EndCallback, JoystickSettings, StartCallback};

/// Intrinsic size of the default outer ring.
pub const DEFAULT_OUTER_SIZE: f32 = 120.0;
/// Intrinsic size of the default inner handle.
pub const DEFAULT_INNER_SIZE: f32 = 70.0;
/// Opacity of the default outer ring.
pub const DEFAULT_OUTER_OPACITY: f32 = 0.5;
/// Handle opacity while not dragging.
pub const STANDBY_OPACITY: f32 = 0.5;
/// Handle opacity while dragging.
pub const ACTIVE_OPACITY: f32 = 1.0;

const OUTER_RADIUS_DIVISOR: f32 = 2.5;
const INNER_RADIUS_DIVISOR: f32 = 2.0;

/// Payload reported on every effective drag move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoystickChange {
    /// Degrees in [0, 360), "up" is 90°
    pub angle: f32,
    pub direction: Direction,
    /// Normalized magnitude in [0, 1]
    pub power: f32,
}

/// Lifecycle notification returned by [`Joystick::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum JoystickEvent {
    Start,
    Change(JoystickChange),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        pointer: PointerId,
        /// Ring center in local coordinates
        start: Point,
    },
}

/// Virtual joystick over a pair of host drawables.
pub struct Joystick<E: Drawable> {
    outer: E,
    inner: E,
    outer_radius: f32,
    inner_radius: f32,
    outer_scale: Scale,
    inner_scale: Scale,
    multi_touch: bool,
    /// Global position of the component's top-left corner
    position: Point,
    cursor: Cursor,
    callbacks: Callbacks,
    drag: DragState,
    power: f32,
    last_change: Option<JoystickChange>,
}

impl<E: ShapeFactory> Joystick<E> {
    /// Build a joystick, synthesizing default ellipses for missing elements.
    pub fn new(mut settings: JoystickSettings<E>) -> Self {
        let outer = settings.outer.take().unwrap_or_else(|| {
            E::ellipse(
                DEFAULT_OUTER_SIZE,
                DEFAULT_OUTER_SIZE,
                Color::BLACK,
                DEFAULT_OUTER_OPACITY,
            )
        });
        let inner = settings.inner.take().unwrap_or_else(|| {
            E::ellipse(
                DEFAULT_INNER_SIZE,
                DEFAULT_INNER_SIZE,
                Color::BLACK,
                STANDBY_OPACITY,
            )
        });
        Self::from_elements(outer, inner, settings)
    }
}

impl<E: Drawable> Joystick<E> {
    /// Build a joystick around caller-supplied elements.
    ///
    /// `settings.outer`/`settings.inner` are ignored; the elements passed here
    /// win. Ownership moves into the joystick, which scales and positions them.
    pub fn from_elements(outer: E, inner: E, settings: JoystickSettings<E>) -> Self {
        if settings.outer.is_some() || settings.inner.is_some() {
            debug!("Ignoring elements in settings; using the ones passed to from_elements");
        }

        let mut joystick = Self {
            outer,
            inner,
            outer_radius: 0.0,
            inner_radius: 0.0,
            outer_scale: settings.outer_scale,
            inner_scale: settings.inner_scale,
            multi_touch: settings.multi_touch,
            position: Point::ZERO,
            cursor: Cursor::Default,
            callbacks: Callbacks {
                on_start: settings.on_start,
                on_change: settings.on_change,
                on_end: settings.on_end,
            },
            drag: DragState::Idle,
            power: 0.0,
            last_change: None,
        };
        joystick.initialize();
        joystick
    }

    fn initialize(&mut self) {
        self.outer.set_scale(self.outer_scale);
        self.inner.set_scale(self.inner_scale);

        let (outer_width, _) = self.outer.scaled_size();
        let (inner_width, _) = self.inner.scaled_size();
        self.outer_radius = outer_width / OUTER_RADIUS_DIVISOR;
        self.inner_radius = inner_width / INNER_RADIUS_DIVISOR;

        self.center_inner();
        self.cursor = Cursor::Pointer;

        debug!(
            "Joystick initialized: outer_radius={:.2}, inner_radius={:.2}",
            self.outer_radius, self.inner_radius
        );
    }

    /// Place the handle in the middle of the ring using current scaled sizes.
    fn center_inner(&mut self) {
        let (outer_width, outer_height) = self.outer.scaled_size();
        let (inner_width, inner_height) = self.inner.scaled_size();
        self.inner.set_position(Point::new(
            outer_width / 2.0 - inner_width / 2.0,
            outer_height / 2.0 - inner_height / 2.0,
        ));
    }

    /// Ring center in local coordinates.
    fn ring_center(&self) -> Point {
        let (outer_width, outer_height) = self.outer.scaled_size();
        Point::new(outer_width / 2.0, outer_height / 2.0)
    }

    /// Route a host pointer event through the drag state machine.
    ///
    /// The pointer position is converted with the component's own translation
    /// (see [`Joystick::set_position`]).
    pub fn handle(&mut self, event: PointerEvent) -> Option<JoystickEvent> {
        let origin = self.position;
        self.handle_with(event, &origin)
    }

    /// Route a host pointer event, converting positions with `space`.
    ///
    /// Hosts with scaled or rotated scene graphs pass their own conversion.
    /// A pointer-down outside the component's bounds is ignored.
    pub fn handle_with(
        &mut self,
        event: PointerEvent,
        space: &dyn CoordinateSpace,
    ) -> Option<JoystickEvent> {
        match event.kind {
            PointerKind::Down => {
                if !self.hits(space.to_local(event.position)) {
                    trace!("Ignoring pointer-down at {:?}: outside bounds", event.position);
                    return None;
                }
                if self.is_captured_by_other(event.pointer) {
                    trace!("Ignoring pointer {:?}: drag owned by another pointer", event.pointer);
                    return None;
                }
                self.begin_drag(event.pointer);
                Some(JoystickEvent::Start)
            },
            PointerKind::Move => {
                if self.is_captured_by_other(event.pointer) {
                    return None;
                }
                self.drag_move(space.to_local(event.position))
                    .map(JoystickEvent::Change)
            },
            PointerKind::Up => {
                if self.is_captured_by_other(event.pointer) {
                    return None;
                }
                self.drag_end().then_some(JoystickEvent::End)
            },
        }
    }

    /// Hit-test in local coordinates against the scaled outer footprint.
    fn hits(&self, local: Point) -> bool {
        let (width, height) = self.size();
        (0.0..=width).contains(&local.x) && (0.0..=height).contains(&local.y)
    }

    fn is_captured_by_other(&self, pointer: PointerId) -> bool {
        match self.drag {
            DragState::Dragging { pointer: owner, .. } => self.multi_touch && owner != pointer,
            DragState::Idle => false,
        }
    }

    /// Pointer-down handler.
    ///
    /// Re-derives the ring center, switches the handle to full opacity and
    /// fires `on_start`. Calling it while already dragging restarts the drag.
    pub fn drag_start(&mut self) {
        self.begin_drag(PointerId::default());
    }

    fn begin_drag(&mut self, pointer: PointerId) {
        let start = self.ring_center();
        self.drag = DragState::Dragging { pointer, start };
        self.inner.set_opacity(ACTIVE_OPACITY);

        debug!("Joystick drag started (pointer {:?})", pointer);
        self.callbacks.start();
    }

    /// Pointer-move handler, `local` in component coordinates.
    ///
    /// Returns the emitted change, or `None` when idle or when the pointer sits
    /// exactly on the ring center.
    pub fn drag_move(&mut self, local: Point) -> Option<JoystickChange> {
        let DragState::Dragging { start, .. } = self.drag else {
            return None;
        };

        let side = local - start;
        let deflection = geometry::deflect(side, self.outer_radius)?;

        self.power = self.power(deflection.offset);
        let center = start + deflection.offset;
        self.inner.set_position(Point::new(
            center.x - self.inner_radius,
            center.y - self.inner_radius,
        ));

        let change = JoystickChange {
            angle: deflection.angle,
            direction: deflection.direction,
            power: self.power,
        };
        trace!(
            "Joystick moved: angle={:.1}, direction={}, power={:.3}",
            change.angle,
            change.direction,
            change.power
        );

        self.last_change = Some(change);
        self.callbacks.change(&change);
        Some(change)
    }

    /// Pointer-up handler.
    ///
    /// Recenters the handle, restores standby opacity, clears the drag's
    /// power and last change, then fires `on_end`.
    /// Returns `false` (and does nothing) when no drag is active.
    pub fn drag_end(&mut self) -> bool {
        if self.drag == DragState::Idle {
            return false;
        }

        self.center_inner();
        self.drag = DragState::Idle;
        self.power = 0.0;
        self.last_change = None;
        self.inner.set_opacity(STANDBY_OPACITY);

        debug!("Joystick drag ended");
        self.callbacks.end();
        true
    }

    /// Normalized power of an offset from the ring center, [0, 1].
    ///
    /// A zero-sized ring reports 0.0 rather than NaN.
    pub fn power(&self, point: Point) -> f32 {
        geometry::power(point, self.outer_radius)
    }

    /// 8-way direction of an offset from the ring center.
    pub fn direction(&self, point: Point) -> Direction {
        geometry::direction(point)
    }

    pub fn outer(&self) -> &E {
        &self.outer
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Children in paint order: ring behind handle.
    pub fn children(&self) -> [&E; 2] {
        [&self.outer, &self.inner]
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_scale(&self) -> Scale {
        self.outer_scale
    }

    pub fn inner_scale(&self) -> Scale {
        self.inner_scale
    }

    pub fn multi_touch(&self) -> bool {
        self.multi_touch
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Power computed by the most recent effective move, 0.0 outside a drag.
    pub fn last_power(&self) -> f32 {
        self.power
    }

    /// Most recent change emitted during the current drag.
    pub fn last_change(&self) -> Option<JoystickChange> {
        self.last_change
    }

    /// Global position of the component's top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Scaled outer size, i.e. the component's footprint.
    pub fn size(&self) -> (f32, f32) {
        self.outer.scaled_size()
    }

    /// Whether a global point falls inside the component's bounding box.
    pub fn contains(&self, global: Point) -> bool {
        self.hits(self.position.to_local(global))
    }

    /// Paint children into the host scene, ring first.
    pub fn render<S: Scene<E> + ?Sized>(&self, scene: &mut S) {
        for child in self.children() {
            scene.paint(child, self.position);
        }
    }
}

impl<E: Drawable> CoordinateSpace for Joystick<E> {
    fn to_local(&self, global: Point) -> Point {
        self.position.to_local(global)
    }
}

impl<E: Drawable + std::fmt::Debug> std::fmt::Debug for Joystick<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Joystick")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .field("outer_radius", &self.outer_radius)
            .field("inner_radius", &self.inner_radius)
            .field("position", &self.position)
            .field("drag", &self.drag)
            .field("power", &self.power)
            .finish_non_exhaustive()
    }
}
