// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connection setup and the owned event queue.
//!
//! # Initialization sequence
//!
//! ```text
//! validate config
//!   -> connect, create EventQueue<SurfaceState<A>>, get wl_registry
//!   -> roundtrip: globals announced, CapabilityRegistry picks, backend binds
//!   -> verify mandatory capabilities (compositor, shm, layer shell)
//!   -> load cursor theme (optional)
//!   -> create wl_surface + layer role, push placement, commit
//!   -> roundtrip: configure(serial) arrives, ack_configure(serial)
//!   -> Active
//! ```
//!
//! Any failure drops the partly built [`SurfaceManager`], which releases
//! everything acquired so far before the error reaches the caller.
//!
//! # Dispatching
//!
//! All protocol objects are created with [`SurfaceManager::queue_handle`];
//! events for objects created on another queue are never delivered here.
//!
//! [`SurfaceManager::dispatch`] only runs handlers for events that have
//! already been read from the socket. It does **not** perform socket I/O.
//! A non-blocking host loop looks like:
//!
//! ```text
//! loop {
//!     manager.flush()?;
//!     poll(manager.connection().backend().poll_fd(), POLLIN, timeout);
//!     manager.read_events()?;
//!     manager.dispatch(&mut draw)?;
//!     for action in manager.sink_mut().drain() { ... }
//! }
//! ```

use std::io::ErrorKind;

use herbew_core::{ActionSink, SurfaceConfig, SurfaceLifecycle, SurfacePhase};
use tracing::{debug, info};
use wayland_client::{
    Connection, DispatchError, EventQueue, QueueHandle,
    backend::{ReadEventsGuard, WaylandError},
};

use crate::draw::DrawHandler;
use crate::error::InitError;
use crate::state::SurfaceState;

/// Owner of the compositor connection, its event queue and the overlay
/// surface.
///
/// Actions go to the sink `A`, which stays reachable through
/// [`Self::sink`] and [`Self::sink_mut`].
///
/// Dropping the manager destroys the cursor surface, the layer role and the
/// surface, in that order, then flushes and closes the connection.
#[derive(Debug)]
pub struct SurfaceManager<A: ActionSink + 'static> {
    state: SurfaceState<A>,
    event_queue: EventQueue<SurfaceState<A>>,
    connection: Connection,
}

impl<A: ActionSink + 'static> SurfaceManager<A> {
    /// Connects using `WAYLAND_DISPLAY`/`WAYLAND_SOCKET` and brings the
    /// surface up.
    ///
    /// Returns once the surface is [`SurfacePhase::Active`]. Actions produced
    /// by later dispatches are delivered to `sink`.
    ///
    /// # Errors
    ///
    /// See [`InitError`]. There is no partial success.
    pub fn connect(
        config: SurfaceConfig,
        sink: A,
    ) -> Result<Self, InitError> {
        let connection = Connection::connect_to_env()?;
        Self::with_connection(connection, config, sink)
    }

    /// Brings the surface up on an existing connection.
    ///
    /// # Errors
    ///
    /// See [`InitError`].
    pub fn with_connection(
        connection: Connection,
        config: SurfaceConfig,
        sink: A,
    ) -> Result<Self, InitError> {
        config.validate()?;

        let event_queue = connection.new_event_queue();
        let qh = event_queue.handle();
        let _registry = connection.display().get_registry(&qh, ());
        let mut manager = Self {
            state: SurfaceState::new(config, sink),
            event_queue,
            connection,
        };

        manager.event_queue.roundtrip(&mut manager.state)?;
        manager.state.capabilities.verify()?;
        debug!(
            capabilities = ?manager.state.capabilities.capabilities(),
            "capabilities verified"
        );

        manager.state.load_cursor(&manager.connection, &qh);
        manager.state.create_surface(&qh)?;
        manager.event_queue.roundtrip(&mut manager.state)?;
        require_active(&mut manager.state.lifecycle)?;

        info!(
            phase = ?manager.state.phase(),
            size = ?manager.state.lifecycle.configured_size(),
            pointer = manager.state.has_pointer(),
            "overlay surface active"
        );
        Ok(manager)
    }

    /// Returns the queue handle every protocol object must be created with.
    #[must_use]
    pub fn queue_handle(&self) -> QueueHandle<SurfaceState<A>> {
        self.event_queue.handle()
    }

    /// Dispatches already-queued events without blocking.
    ///
    /// When at least one event was dispatched and the surface is active,
    /// `draw` is called once afterwards. Returns the number of events
    /// dispatched.
    ///
    /// # Errors
    ///
    /// A protocol or transport failure. Nothing is retried.
    pub fn dispatch<D: DrawHandler<A>>(&mut self, draw: &mut D) -> Result<usize, DispatchError> {
        let dispatched = self.event_queue.dispatch_pending(&mut self.state)?;
        self.after_dispatch(dispatched, draw);
        Ok(dispatched)
    }

    /// Flushes requests, blocks for new events when needed, and dispatches.
    ///
    /// Wraps [`EventQueue::blocking_dispatch`], with the same draw rule as
    /// [`Self::dispatch`].
    ///
    /// # Errors
    ///
    /// A protocol or transport failure.
    pub fn blocking_dispatch<D: DrawHandler<A>>(
        &mut self,
        draw: &mut D,
    ) -> Result<usize, DispatchError> {
        let dispatched = self.event_queue.blocking_dispatch(&mut self.state)?;
        self.after_dispatch(dispatched, draw);
        Ok(dispatched)
    }

    /// Calls `draw` immediately if the surface is active.
    ///
    /// Returns whether `draw` ran. Useful right after setup, when the
    /// initial configure has already been consumed.
    pub fn redraw<D: DrawHandler<A>>(&self, draw: &mut D) -> bool {
        let qh = self.event_queue.handle();
        let Some(target) = self.state.draw_target(&qh) else {
            return false;
        };
        draw.draw(&target);
        true
    }

    /// Flushes pending outgoing requests to the socket.
    ///
    /// # Errors
    ///
    /// The socket write failed.
    pub fn flush(&self) -> Result<(), WaylandError> {
        self.event_queue.flush()
    }

    /// Starts a synchronized socket read for poll-based loops.
    ///
    /// If this returns [`None`], dispatch queued events before trying again.
    #[must_use]
    pub fn prepare_read(&self) -> Option<ReadEventsGuard> {
        self.event_queue.prepare_read()
    }

    /// Reads whatever events the socket has ready, without blocking.
    ///
    /// Returns the number of events read, `0` when the socket had nothing or
    /// when queued events must be dispatched first.
    ///
    /// # Errors
    ///
    /// The socket read failed or the connection was lost.
    pub fn read_events(&self) -> Result<usize, WaylandError> {
        let Some(guard) = self.prepare_read() else {
            return Ok(0);
        };
        match guard.read() {
            Ok(count) => Ok(count),
            Err(WaylandError::Io(err)) if err.kind() == ErrorKind::WouldBlock => Ok(0),
            Err(err) => Err(err),
        }
    }

    /// The compositor connection, e.g. to poll its file descriptor.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Protocol state.
    #[must_use]
    pub fn state(&self) -> &SurfaceState<A> {
        &self.state
    }

    /// The action sink.
    #[must_use]
    pub fn sink(&self) -> &A {
        self.state.sink()
    }

    /// The action sink, e.g. to drain an [`ActionQueue`](herbew_core::ActionQueue)
    /// after each dispatch.
    pub fn sink_mut(&mut self) -> &mut A {
        self.state.sink_mut()
    }

    /// Current lifecycle phase of the surface.
    #[must_use]
    pub fn phase(&self) -> SurfacePhase {
        self.state.phase()
    }

    /// Whether the compositor closed the surface. Terminal.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lifecycle.is_destroyed()
    }

    fn after_dispatch<D: DrawHandler<A>>(&self, dispatched: usize, draw: &mut D) {
        if dispatched > 0 {
            let _ = self.redraw(draw);
        }
    }
}

impl<A: ActionSink + 'static> Drop for SurfaceManager<A> {
    fn drop(&mut self) {
        self.state.release();
        if let Err(err) = self.connection.flush() {
            debug!(%err, "flush on shutdown failed");
        }
    }
}

/// Promotes the surface after the initial round-trips, or fails if the
/// compositor never configured it.
fn require_active(lifecycle: &mut SurfaceLifecycle) -> Result<(), InitError> {
    if lifecycle.activate() {
        Ok(())
    } else {
        Err(InitError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::require_active;
    use crate::error::InitError;
    use herbew_core::{SurfaceLifecycle, SurfacePhase};

    #[test]
    fn unconfigured_surface_fails_initialization() {
        let mut lifecycle = SurfaceLifecycle::new();
        assert!(matches!(
            require_active(&mut lifecycle),
            Err(InitError::NotConfigured)
        ));
    }

    #[test]
    fn surface_closed_during_setup_fails_initialization() {
        let mut lifecycle = SurfaceLifecycle::new();
        let _ = lifecycle.configure(3, 400, 60);
        let _ = lifecycle.close();
        assert!(matches!(
            require_active(&mut lifecycle),
            Err(InitError::NotConfigured)
        ));
    }

    #[test]
    fn configured_surface_becomes_active() {
        let mut lifecycle = SurfaceLifecycle::new();
        let _ = lifecycle.configure(3, 400, 60);
        assert!(require_active(&mut lifecycle).is_ok());
        assert_eq!(lifecycle.phase(), SurfacePhase::Active { serial: 3 });
    }
}
