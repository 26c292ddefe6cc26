// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer state machine translating raw pointer events into [`Action`]s.
//!
//! [`PointerMachine`] is generic over the surface identity type `S` so it can
//! be driven by protocol object ids in the backend and by plain integers in
//! tests. It owns a [`PointerState`] and the identity of the one surface this
//! client manages; button presses are only translated while that surface is
//! hovered.

use tracing::trace;

use crate::action::Action;

/// Linux evdev code of the left mouse button (`BTN_LEFT`).
pub const BTN_LEFT: u32 = 0x110;
/// Linux evdev code of the right mouse button (`BTN_RIGHT`).
pub const BTN_RIGHT: u32 = 0x111;

/// Converts a surface-local coordinate to integer pixels.
///
/// Truncates toward zero, matching `wl_fixed_to_int`. Out-of-range values
/// saturate.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, and truncation is the intended rounding"
)]
pub fn fixed_to_int(value: f64) -> i32 {
    value as i32
}

/// Whether a button went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// The button was pressed.
    Pressed,
    /// The button was released.
    Released,
}

/// A raw pointer event, already decoded from the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent<S> {
    /// The pointer entered `surface` at surface-local `(x, y)`.
    Enter {
        /// Surface the pointer is now over.
        surface: S,
        /// Surface-local x.
        x: f64,
        /// Surface-local y.
        y: f64,
    },
    /// The pointer left `surface`.
    Leave {
        /// Surface the pointer left.
        surface: S,
    },
    /// The pointer moved to surface-local `(x, y)`.
    Motion {
        /// Surface-local x.
        x: f64,
        /// Surface-local y.
        y: f64,
    },
    /// A button changed state.
    Button {
        /// Linux evdev button code.
        button: u32,
        /// New state of the button.
        state: ButtonState,
    },
}

/// Which button codes map to which action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonMap {
    /// Code emitting [`Action::PrimaryActivate`] on press.
    pub primary: u32,
    /// Code emitting [`Action::SecondaryDismiss`] on press.
    pub secondary: u32,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            primary: BTN_LEFT,
            secondary: BTN_RIGHT,
        }
    }
}

impl ButtonMap {
    /// Action bound to `button`, if any.
    #[must_use]
    pub const fn action_for(&self, button: u32) -> Option<Action> {
        if button == self.primary {
            Some(Action::PrimaryActivate)
        } else if button == self.secondary {
            Some(Action::SecondaryDismiss)
        } else {
            None
        }
    }
}

/// Tracked pointer position, hover target, and button latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerState<S> {
    position: Option<(i32, i32)>,
    hovered: Option<S>,
    button: Option<u32>,
}

impl<S> Default for PointerState<S> {
    fn default() -> Self {
        Self {
            position: None,
            hovered: None,
            button: None,
        }
    }
}

impl<S> PointerState<S> {
    /// Surface-local integer position, or [`None`] when outside.
    #[must_use]
    pub const fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    /// Surface currently under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<&S> {
        self.hovered.as_ref()
    }

    /// Last pressed button that has not been released.
    #[must_use]
    pub const fn button(&self) -> Option<u32> {
        self.button
    }

    /// Whether the pointer is outside every tracked surface.
    #[must_use]
    pub const fn is_outside(&self) -> bool {
        self.position.is_none()
    }

    fn reset(&mut self) {
        self.position = None;
        self.hovered = None;
        self.button = None;
    }
}

/// Maps pointer events over the managed surface to actions.
#[derive(Clone, Debug)]
pub struct PointerMachine<S> {
    managed: S,
    buttons: ButtonMap,
    state: PointerState<S>,
}

impl<S: PartialEq> PointerMachine<S> {
    /// Creates a machine for the surface identified by `managed`.
    #[must_use]
    pub fn new(managed: S, buttons: ButtonMap) -> Self {
        Self {
            managed,
            buttons,
            state: PointerState::default(),
        }
    }

    /// Current tracked state.
    #[must_use]
    pub const fn state(&self) -> &PointerState<S> {
        &self.state
    }

    /// Whether the managed surface is under the pointer.
    #[must_use]
    pub fn is_over_managed(&self) -> bool {
        self.state.hovered.as_ref() == Some(&self.managed)
    }

    /// Feeds one event and returns the action it triggers, if any.
    ///
    /// Only button presses over the managed surface produce actions. Every
    /// press produces one; there is no debouncing.
    pub fn handle(&mut self, event: PointerEvent<S>) -> Option<Action> {
        match event {
            PointerEvent::Enter { surface, x, y } => {
                self.state.hovered = Some(surface);
                self.state.position = Some((fixed_to_int(x), fixed_to_int(y)));
                None
            }
            PointerEvent::Leave { .. } => {
                self.state.reset();
                None
            }
            PointerEvent::Motion { x, y } => {
                self.state.position = Some((fixed_to_int(x), fixed_to_int(y)));
                None
            }
            PointerEvent::Button { button, state } => self.button(button, state),
        }
    }

    /// Drops all tracked state, as when the seat loses its pointer.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn button(&mut self, button: u32, state: ButtonState) -> Option<Action> {
        match state {
            ButtonState::Pressed => self.state.button = Some(button),
            ButtonState::Released => {
                if self.state.button == Some(button) {
                    self.state.button = None;
                }
                return None;
            }
        }
        if !self.is_over_managed() {
            trace!(button, "press outside managed surface");
            return None;
        }
        self.buttons.action_for(button)
    }
}
