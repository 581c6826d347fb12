//! Construction options for [`Joystick`](super::Joystick).

use std::fmt;

use super::JoystickChange;
use crate::geometry::Scale;

pub type StartCallback = Box<dyn FnMut()>;
pub type ChangeCallback = Box<dyn FnMut(&JoystickChange)>;
pub type EndCallback = Box<dyn FnMut()>;

/// Joystick configuration.
///
/// Missing `outer`/`inner` elements are synthesized as default ellipses when
/// the element type supports it. Callbacks are invoked synchronously from the
/// pointer handlers; a panic inside one propagates to the caller.
pub struct JoystickSettings<E> {
    pub outer: Option<E>,
    pub inner: Option<E>,
    pub outer_scale: Scale,
    pub inner_scale: Scale,
    /// Capture the pointer that started a drag and ignore all others
    pub multi_touch: bool,
    pub on_start: Option<StartCallback>,
    pub on_change: Option<ChangeCallback>,
    pub on_end: Option<EndCallback>,
}

impl<E> JoystickSettings<E> {
    pub fn new() -> Self {
        Self {
            outer: None,
            inner: None,
            outer_scale: Scale::default(),
            inner_scale: Scale::default(),
            multi_touch: false,
            on_start: None,
            on_change: None,
            on_end: None,
        }
    }

    pub fn outer(mut self, outer: E) -> Self {
        self.outer = Some(outer);
        self
    }

    pub fn inner(mut self, inner: E) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn outer_scale(mut self, x: f32, y: f32) -> Self {
        self.outer_scale = Scale::new(x, y);
        self
    }

    pub fn inner_scale(mut self, x: f32, y: f32) -> Self {
        self.inner_scale = Scale::new(x, y);
        self
    }

    pub fn multi_touch(mut self, enabled: bool) -> Self {
        self.multi_touch = enabled;
        self
    }

    pub fn on_start(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&JoystickChange) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }
}

impl<E> Default for JoystickSettings<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for JoystickSettings<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoystickSettings")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .field("outer_scale", &self.outer_scale)
            .field("inner_scale", &self.inner_scale)
            .field("multi_touch", &self.multi_touch)
            .field("on_start", &self.on_start.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// Callbacks kept by the joystick after construction.
#[derive(Default)]
pub(super) struct Callbacks {
    pub on_start: Option<StartCallback>,
    pub on_change: Option<ChangeCallback>,
    pub on_end: Option<EndCallback>,
}

impl Callbacks {
    pub fn start(&mut self) {
        if let Some(callback) = self.on_start.as_mut() {
            callback();
        }
    }

    pub fn change(&mut self, change: &JoystickChange) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(change);
        }
    }

    pub fn end(&mut self) {
        if let Some(callback) = self.on_end.as_mut() {
            callback();
        }
    }
}
