// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render callback boundary.
//!
//! The manager never draws. After a dispatch that processed at least one
//! event while the surface is active, it hands the host a [`DrawTarget`]
//! describing where content may go. What gets attached and committed is the
//! host's business.

use core::fmt;

use herbew_core::ActionSink;
use wayland_client::QueueHandle;
use wayland_client::protocol::{wl_shm::WlShm, wl_surface::WlSurface};

use crate::state::SurfaceState;

/// Everything a render callback needs to put pixels on the managed surface.
///
/// `A` is the manager's action sink type.
pub struct DrawTarget<'a, A> {
    /// The managed surface. Attach, damage and commit here.
    pub surface: &'a WlSurface,
    /// Shared-memory global for creating buffer pools.
    pub shm: &'a WlShm,
    /// Current `(width, height)` in surface-local pixels.
    ///
    /// The compositor's configured size, with zero components replaced by
    /// the requested size.
    pub size: (u32, u32),
    /// Queue that pools and buffers must be created on.
    pub queue: &'a QueueHandle<SurfaceState<A>>,
}

impl<A> fmt::Debug for DrawTarget<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawTarget")
            .field("surface", self.surface)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Host-supplied render callback for a manager with sink `A`.
pub trait DrawHandler<A: ActionSink + 'static> {
    /// Draws one frame into `target`.
    fn draw(&mut self, target: &DrawTarget<'_, A>);
}

impl<A, F> DrawHandler<A> for F
where
    A: ActionSink + 'static,
    F: FnMut(&DrawTarget<'_, A>),
{
    fn draw(&mut self, target: &DrawTarget<'_, A>) {
        self(target);
    }
}

/// A [`DrawHandler`] that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDraw;

impl<A: ActionSink + 'static> DrawHandler<A> for NoDraw {
    fn draw(&mut self, _target: &DrawTarget<'_, A>) {}
}
