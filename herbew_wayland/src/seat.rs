// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seat and pointer listeners.
//!
//! The pointer is requested the first time the seat advertises the pointer
//! capability. Its events are decoded into [`PointerEvent`]s and fed to the
//! state machine; everything else a pointer reports (axis, frame, gestures)
//! is ignored.

use herbew_core::{ActionSink, PointerEvent};
use tracing::{debug, trace};
use wayland_client::protocol::wl_pointer::{self, WlPointer};
use wayland_client::protocol::wl_seat::{self, WlSeat};
use wayland_client::{Connection, Dispatch, Proxy, QueueHandle, WEnum};

use crate::convert;
use crate::state::SurfaceState;

impl<A: ActionSink + 'static> Dispatch<WlSeat, ()> for SurfaceState<A> {
    fn event(
        state: &mut Self,
        seat: &WlSeat,
        event: wl_seat::Event,
        _data: &(),
        _conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        let wl_seat::Event::Capabilities {
            capabilities: WEnum::Value(capabilities),
        } = event
        else {
            return;
        };

        let has_pointer = capabilities.contains(wl_seat::Capability::Pointer);
        match pointer_transition(has_pointer, state.pointer.is_some()) {
            PointerTransition::Subscribe => {
                debug!("seat has a pointer, subscribing");
                state.pointer = Some(seat.get_pointer(qh, ()));
            }
            PointerTransition::Release => {
                debug!("seat lost its pointer");
                if let Some(pointer) = state.pointer.take()
                    && pointer.version() >= 3
                {
                    pointer.release();
                }
                if let Some(input) = state.input.as_mut() {
                    input.reset();
                }
            }
            PointerTransition::Keep | PointerTransition::Dormant => {}
        }
    }
}

/// What to do with the pointer when the seat re-announces its capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerTransition {
    /// First pointer capability: request a `wl_pointer`.
    Subscribe,
    /// Pointer still present and already subscribed.
    Keep,
    /// Pointer capability withdrawn: release it and reset tracking.
    Release,
    /// No pointer before or after.
    Dormant,
}

const fn pointer_transition(has_pointer: bool, had_pointer: bool) -> PointerTransition {
    match (has_pointer, had_pointer) {
        (true, false) => PointerTransition::Subscribe,
        (true, true) => PointerTransition::Keep,
        (false, true) => PointerTransition::Release,
        (false, false) => PointerTransition::Dormant,
    }
}

impl<A: ActionSink + 'static> Dispatch<WlPointer, ()> for SurfaceState<A> {
    fn event(
        state: &mut Self,
        pointer: &WlPointer,
        event: wl_pointer::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        let decoded = match event {
            wl_pointer::Event::Enter {
                serial,
                surface,
                surface_x,
                surface_y,
            } => {
                if let Some(cursor) = state.cursor.as_mut() {
                    cursor.apply(pointer, serial);
                }
                PointerEvent::Enter {
                    surface: surface.id(),
                    x: surface_x,
                    y: surface_y,
                }
            }
            wl_pointer::Event::Leave { surface, .. } => PointerEvent::Leave {
                surface: surface.id(),
            },
            wl_pointer::Event::Motion {
                surface_x,
                surface_y,
                ..
            } => PointerEvent::Motion {
                x: surface_x,
                y: surface_y,
            },
            wl_pointer::Event::Button {
                button,
                state: button_state,
                ..
            } => {
                let Some(button_state) = convert::button_state(button_state) else {
                    trace!(button, "unknown button state");
                    return;
                };
                PointerEvent::Button {
                    button,
                    state: button_state,
                }
            }
            _ => return,
        };
        state.feed_pointer(decoded);
    }
}
