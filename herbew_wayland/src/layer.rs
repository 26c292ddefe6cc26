// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer surface creation and the configure/acknowledge listener.
//!
//! ```text
//! wl_compositor.create_surface ──► zwlr_layer_shell_v1.get_layer_surface
//!   ──► set_size / set_anchor / set_exclusive_zone / set_margin
//!   ──► set_keyboard_interactivity ──► wl_surface.commit (no buffer)
//!   ◄── configure(serial) ──► ack_configure(serial)
//! ```
//!
//! Placement is pushed once, before the first commit.

use herbew_core::{ActionSink, Capability, MissingCapability, PointerMachine};
use tracing::{debug, info, warn};
use wayland_client::{Connection, Dispatch, Proxy, QueueHandle};
use wayland_protocols_wlr::layer_shell::v1::client::zwlr_layer_surface_v1::{
    self, ZwlrLayerSurfaceV1,
};

use crate::convert;
use crate::error::InitError;
use crate::state::{SurfaceHandles, SurfaceState};

impl<A: ActionSink + 'static> SurfaceState<A> {
    /// Creates the surface, assigns the layer role and commits the placement.
    pub(crate) fn create_surface(&mut self, qh: &QueueHandle<Self>) -> Result<(), InitError> {
        let compositor = self
            .globals
            .compositor
            .as_ref()
            .ok_or(MissingCapability(Capability::Compositor))?;
        let layer_shell = self
            .globals
            .layer_shell
            .as_ref()
            .ok_or(MissingCapability(Capability::LayerShell))?;

        let selector = self.capabilities.outputs();
        if let Some(ordinal) = selector.target()
            && !selector.is_target_reached()
        {
            warn!(
                ordinal,
                "selected output was never announced, letting the compositor choose"
            );
        }
        let output = if selector.passes_output_to_role() {
            self.globals.output.as_ref()
        } else {
            None
        };

        let placement = self.config.placement();
        let surface = compositor.create_surface(qh, ());
        let layer_surface = layer_shell.get_layer_surface(
            &surface,
            output,
            convert::layer(placement.layer),
            self.config.namespace.clone(),
            qh,
            (),
        );

        let (width, height) = placement.size;
        let margins = placement.margins;
        layer_surface.set_size(width, height);
        layer_surface.set_anchor(convert::anchor(placement.anchor));
        layer_surface.set_exclusive_zone(placement.exclusive_zone);
        layer_surface.set_margin(margins.top, margins.right, margins.bottom, margins.left);
        layer_surface.set_keyboard_interactivity(convert::keyboard_interactivity(
            placement.keyboard_interactive,
        ));
        surface.commit();

        info!(
            namespace = %self.config.namespace,
            width,
            height,
            exclusive_zone = placement.exclusive_zone,
            on_selected_output = output.is_some(),
            "layer surface committed"
        );

        self.input = Some(PointerMachine::new(surface.id(), self.config.buttons));
        self.handles = Some(SurfaceHandles {
            surface,
            layer_surface,
        });
        Ok(())
    }
}

impl<A: ActionSink + 'static> Dispatch<ZwlrLayerSurfaceV1, ()> for SurfaceState<A> {
    fn event(
        state: &mut Self,
        layer_surface: &ZwlrLayerSurfaceV1,
        event: zwlr_layer_surface_v1::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            zwlr_layer_surface_v1::Event::Configure {
                serial,
                width,
                height,
            } => {
                let Some(serial) = state.lifecycle.configure(serial, width, height) else {
                    debug!(serial, "configure after close, ignoring");
                    return;
                };
                layer_surface.ack_configure(serial);
                debug!(serial, width, height, "configure acknowledged");
            }
            zwlr_layer_surface_v1::Event::Closed => {
                if state.lifecycle.close() {
                    state.release_surface();
                }
            }
            _ => {}
        }
    }
}
