// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output listener. The selected output only needs to exist; its events
//! are logged.

use herbew_core::ActionSink;
use tracing::debug;
use wayland_client::protocol::wl_output::{self, WlOutput};
use wayland_client::{Connection, Dispatch, QueueHandle, WEnum};

use crate::state::SurfaceState;

impl<A: ActionSink + 'static> Dispatch<WlOutput, ()> for SurfaceState<A> {
    fn event(
        _state: &mut Self,
        _output: &WlOutput,
        event: wl_output::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_output::Event::Mode {
                flags: WEnum::Value(flags),
                width,
                height,
                refresh,
            } if flags.contains(wl_output::Mode::Current) => {
                debug!(width, height, refresh, "selected output mode");
            }
            wl_output::Event::Geometry { make, model, .. } => {
                debug!(%make, %model, "selected output geometry");
            }
            _ => {}
        }
    }
}
