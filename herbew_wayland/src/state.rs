// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch state shared by every protocol listener.
//!
//! [`SurfaceState`] is the single owning context: the bound globals, the
//! managed surface, the pointer machine and the action sink all live here.
//! It is generic over the sink `A` so the host keeps typed access to it.
//! Each protocol object kind has its own `Dispatch` impl in a sibling
//! module (`registry`, `seat`, `layer`, `output`); objects whose events are
//! irrelevant get the no-op handlers below.

use core::fmt;

use herbew_core::capability::{Binding, Capability};
use herbew_core::{
    ActionSink, CapabilityRegistry, OutputSelector, PointerEvent, PointerMachine, SurfaceConfig,
    SurfaceLifecycle, SurfacePhase,
};
use tracing::{debug, info};
use wayland_client::backend::ObjectId;
use wayland_client::protocol::{
    wl_buffer::WlBuffer, wl_compositor::WlCompositor, wl_output::WlOutput,
    wl_pointer::WlPointer, wl_registry::WlRegistry, wl_seat::WlSeat, wl_shm::WlShm,
    wl_shm_pool::WlShmPool, wl_surface::WlSurface,
};
use wayland_client::{Connection, Dispatch, Proxy, QueueHandle};
use wayland_protocols_wlr::layer_shell::v1::client::zwlr_layer_shell_v1::ZwlrLayerShellV1;
use wayland_protocols_wlr::layer_shell::v1::client::zwlr_layer_surface_v1::ZwlrLayerSurfaceV1;

use crate::cursor::CursorImage;
use crate::draw::DrawTarget;

/// Typed proxies for bound globals, one per capability.
#[derive(Debug, Default)]
pub(crate) struct Globals {
    pub(crate) compositor: Option<WlCompositor>,
    pub(crate) shm: Option<WlShm>,
    pub(crate) seat: Option<WlSeat>,
    pub(crate) layer_shell: Option<ZwlrLayerShellV1>,
    pub(crate) output: Option<WlOutput>,
}

impl Globals {
    pub(crate) fn bind<A: ActionSink + 'static>(
        &mut self,
        registry: &WlRegistry,
        capability: Capability,
        binding: Binding,
        qh: &QueueHandle<SurfaceState<A>>,
    ) {
        let Binding { name, version } = binding;
        match capability {
            Capability::Compositor => {
                self.compositor = Some(registry.bind(name, version, qh, ()));
            }
            Capability::Shm => self.shm = Some(registry.bind(name, version, qh, ())),
            Capability::Seat => self.seat = Some(registry.bind(name, version, qh, ())),
            Capability::LayerShell => {
                self.layer_shell = Some(registry.bind(name, version, qh, ()));
            }
            Capability::Output => self.output = Some(registry.bind(name, version, qh, ())),
        }
    }
}

/// The managed surface and its layer-shell role.
#[derive(Debug)]
pub(crate) struct SurfaceHandles {
    pub(crate) surface: WlSurface,
    pub(crate) layer_surface: ZwlrLayerSurfaceV1,
}

impl SurfaceHandles {
    /// Role first, then the surface it is attached to.
    fn destroy(self) {
        self.layer_surface.destroy();
        self.surface.destroy();
    }
}

/// Protocol state for the overlay surface.
///
/// Owned by [`SurfaceManager`](crate::SurfaceManager) and only touched from
/// the thread that dispatches its event queue.
pub struct SurfaceState<A> {
    pub(crate) config: SurfaceConfig,
    pub(crate) capabilities: CapabilityRegistry,
    pub(crate) globals: Globals,
    pub(crate) handles: Option<SurfaceHandles>,
    pub(crate) lifecycle: SurfaceLifecycle,
    pub(crate) pointer: Option<WlPointer>,
    pub(crate) input: Option<PointerMachine<ObjectId>>,
    pub(crate) cursor: Option<CursorImage>,
    sink: A,
}

impl<A> fmt::Debug for SurfaceState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceState")
            .field("namespace", &self.config.namespace)
            .field("capabilities", self.capabilities.capabilities())
            .field("phase", &self.lifecycle.phase())
            .field("has_pointer", &self.pointer.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: ActionSink + 'static> SurfaceState<A> {
    pub(crate) fn new(config: SurfaceConfig, sink: A) -> Self {
        let outputs = OutputSelector::from_ordinal(config.output);
        Self {
            config,
            capabilities: CapabilityRegistry::new(outputs),
            globals: Globals::default(),
            handles: None,
            lifecycle: SurfaceLifecycle::new(),
            pointer: None,
            input: None,
            cursor: None,
            sink,
        }
    }

    /// Configuration the surface was created with.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Capability negotiation results.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Current lifecycle phase of the layer surface.
    #[must_use]
    pub fn phase(&self) -> SurfacePhase {
        self.lifecycle.phase()
    }

    /// Whether the seat granted a pointer.
    #[must_use]
    pub fn has_pointer(&self) -> bool {
        self.pointer.is_some()
    }

    /// Surface-local pointer position over a tracked surface, if any.
    #[must_use]
    pub fn pointer_position(&self) -> Option<(i32, i32)> {
        self.input.as_ref().and_then(|input| input.state().position())
    }

    /// The managed surface, while it exists.
    #[must_use]
    pub fn surface(&self) -> Option<&WlSurface> {
        self.handles.as_ref().map(|handles| &handles.surface)
    }

    /// The action sink.
    #[must_use]
    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// The action sink, e.g. to drain an [`ActionQueue`](herbew_core::ActionQueue).
    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    /// Runs one pointer event through the machine and emits any action.
    pub(crate) fn feed_pointer(&mut self, event: PointerEvent<ObjectId>) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        if let Some(action) = input.handle(event) {
            debug!(action = action.as_str(), "emitting action");
            self.sink.emit(action);
        }
    }

    /// Loads the cursor theme once compositor and shm are bound.
    pub(crate) fn load_cursor(&mut self, connection: &Connection, qh: &QueueHandle<Self>) {
        let (Some(compositor), Some(shm)) = (&self.globals.compositor, &self.globals.shm) else {
            return;
        };
        self.cursor = CursorImage::load(connection, shm, compositor, self.config.cursor_size, qh);
    }

    /// Releases the managed surface after the compositor closed it.
    pub(crate) fn release_surface(&mut self) {
        if let Some(handles) = self.handles.take() {
            info!("layer surface closed by compositor, releasing");
            handles.destroy();
        }
        self.input = None;
    }

    /// Releases every owned object in dependency order.
    pub(crate) fn release(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            cursor.destroy();
        }
        if let Some(handles) = self.handles.take() {
            handles.destroy();
        }
        if let Some(pointer) = self.pointer.take()
            && pointer.version() >= 3
        {
            pointer.release();
        }
        self.input = None;
    }

    /// What the render callback may draw into, while the surface is active.
    pub(crate) fn draw_target<'a>(
        &'a self,
        qh: &'a QueueHandle<Self>,
    ) -> Option<DrawTarget<'a, A>> {
        if !self.lifecycle.is_active() {
            return None;
        }
        let handles = self.handles.as_ref()?;
        let shm = self.globals.shm.as_ref()?;
        let (width, height) = self.lifecycle.configured_size().unwrap_or((0, 0));
        let size = (
            if width == 0 { self.config.width } else { width },
            if height == 0 { self.config.height } else { height },
        );
        Some(DrawTarget {
            surface: &handles.surface,
            shm,
            size,
            queue: qh,
        })
    }
}

/// Implements `Dispatch` with an empty handler for interfaces whose events
/// this client does not use.
macro_rules! ignore_events {
    ($($proxy:ty),+ $(,)?) => {$(
        impl<A: ActionSink + 'static> Dispatch<$proxy, ()> for SurfaceState<A> {
            fn event(
                _state: &mut Self,
                _proxy: &$proxy,
                _event: <$proxy as Proxy>::Event,
                _data: &(),
                _conn: &Connection,
                _qh: &QueueHandle<Self>,
            ) {
            }
        }
    )+};
}

ignore_events!(
    WlCompositor,
    ZwlrLayerShellV1,
    WlShmPool,
    WlShm,
    WlSurface,
    WlBuffer,
);

#[cfg(test)]
mod tests {
    use super::SurfaceState;
    use herbew_core::pointer::{BTN_LEFT, BTN_RIGHT, ButtonState};
    use herbew_core::{
        Action, ActionQueue, PointerEvent, PointerMachine, SurfaceConfig, SurfacePhase,
    };
    use wayland_client::backend::ObjectId;

    fn press(button: u32) -> PointerEvent<ObjectId> {
        PointerEvent::Button {
            button,
            state: ButtonState::Pressed,
        }
    }

    #[test]
    fn fresh_state_has_nothing_bound() {
        let state = SurfaceState::new(SurfaceConfig::default(), ActionQueue::default());

        assert_eq!(state.phase(), SurfacePhase::Unconfigured);
        assert!(!state.has_pointer());
        assert!(state.surface().is_none());
        assert_eq!(state.pointer_position(), None);
        assert!(state.capabilities().verify().is_err());
        assert!(state.sink().is_empty());
    }

    #[test]
    fn release_without_objects_is_a_no_op() {
        let mut state = SurfaceState::new(SurfaceConfig::default(), ActionQueue::default());
        state.release();
        state.release_surface();
        assert!(state.surface().is_none());
    }

    #[test]
    fn clicks_on_managed_surface_land_in_the_host_queue() {
        let config = SurfaceConfig::default();
        let buttons = config.buttons;
        let mut state = SurfaceState::new(config, ActionQueue::default());
        state.input = Some(PointerMachine::new(ObjectId::null(), buttons));

        state.feed_pointer(PointerEvent::Enter {
            surface: ObjectId::null(),
            x: 4.0,
            y: 2.5,
        });
        state.feed_pointer(press(BTN_LEFT));
        state.feed_pointer(press(BTN_RIGHT));

        assert_eq!(state.pointer_position(), Some((4, 2)));
        assert_eq!(
            state.sink_mut().drain().collect::<Vec<_>>(),
            [Action::PrimaryActivate, Action::SecondaryDismiss]
        );
        assert!(state.sink().is_empty());
    }

    #[test]
    fn clicks_without_a_surface_are_dropped() {
        let mut state = SurfaceState::new(SurfaceConfig::default(), ActionQueue::default());
        state.feed_pointer(press(BTN_LEFT));
        assert!(state.sink().is_empty());
    }
}
