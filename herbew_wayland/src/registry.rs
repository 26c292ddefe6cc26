// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry listener: routes global announcements through the capability
//! registry and binds what it selects.

use herbew_core::ActionSink;
use herbew_core::capability::BindRequest;
use tracing::debug;
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::{Connection, Dispatch, QueueHandle};

use crate::state::SurfaceState;

impl<A: ActionSink + 'static> Dispatch<WlRegistry, ()> for SurfaceState<A> {
    fn event(
        state: &mut Self,
        registry: &WlRegistry,
        event: wl_registry::Event,
        _data: &(),
        _conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => {
                let Some(BindRequest {
                    capability,
                    binding,
                }) = state.capabilities.announce(name, &interface, version)
                else {
                    return;
                };
                debug!(
                    name,
                    %interface,
                    advertised = version,
                    bound = binding.version,
                    "binding global"
                );
                state.globals.bind(registry, capability, binding, qh);
            }
            wl_registry::Event::GlobalRemove { name } => {
                let _ = state.capabilities.remove(name);
            }
            _ => {}
        }
    }
}
