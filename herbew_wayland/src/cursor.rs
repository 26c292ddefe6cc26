// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Themed cursor image shown while the pointer is over the panel.

use tracing::{debug, trace, warn};
use wayland_client::protocol::{
    wl_buffer::WlBuffer, wl_compositor::WlCompositor, wl_pointer::WlPointer, wl_shm::WlShm,
    wl_surface::WlSurface,
};
use wayland_client::{Connection, QueueHandle};
use wayland_cursor::CursorTheme;

use herbew_core::ActionSink;

use crate::state::SurfaceState;

/// Cursor names tried in order.
const CURSOR_NAMES: [&str; 2] = ["left_ptr", "default"];

/// A loaded cursor theme plus the surface the cursor image is attached to.
pub(crate) struct CursorImage {
    theme: CursorTheme,
    surface: WlSurface,
}

impl core::fmt::Debug for CursorImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorImage")
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl CursorImage {
    /// Loads the default theme at `size` pixels.
    ///
    /// Returns [`None`] (after logging) when no theme can be loaded; the
    /// client then leaves the cursor to the compositor.
    pub(crate) fn load<A: ActionSink + 'static>(
        connection: &Connection,
        shm: &WlShm,
        compositor: &WlCompositor,
        size: u32,
        qh: &QueueHandle<SurfaceState<A>>,
    ) -> Option<Self> {
        match CursorTheme::load(connection, shm.clone(), size) {
            Ok(theme) => Some(Self {
                theme,
                surface: compositor.create_surface(qh, ()),
            }),
            Err(err) => {
                warn!(%err, "cursor theme unavailable");
                None
            }
        }
    }

    /// Sets the themed cursor on `pointer` for the enter with `serial`.
    ///
    /// Uses the first name in [`CURSOR_NAMES`] the theme has at least one
    /// frame for.
    pub(crate) fn apply(&mut self, pointer: &WlPointer, serial: u32) {
        for name in CURSOR_NAMES {
            let Some(cursor) = self.theme.get_cursor(name) else {
                continue;
            };
            if cursor.image_count() == 0 {
                trace!(name, "cursor has no frames");
                continue;
            }
            let image = &cursor[0];
            let (hotspot_x, hotspot_y) = image.hotspot();
            let (width, height) = image.dimensions();
            let buffer: &WlBuffer = image;

            self.surface.attach(Some(buffer), 0, 0);
            self.surface.damage(
                0,
                0,
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            );
            self.surface.commit();
            pointer.set_cursor(
                serial,
                Some(&self.surface),
                i32::try_from(hotspot_x).unwrap_or(0),
                i32::try_from(hotspot_y).unwrap_or(0),
            );
            debug!(name, serial, "cursor image set");
            return;
        }
        warn!("cursor theme has no pointer image");
    }

    pub(crate) fn destroy(self) {
        self.surface.destroy();
    }
}
