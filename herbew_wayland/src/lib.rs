// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayland backend for the herbew overlay surface.
//!
//! This crate drives the protocol-free state machines of [`herbew_core`]
//! from a real compositor connection:
//!
//! - registry negotiation and binding of `wl_compositor`, `wl_shm`,
//!   `wl_seat`, `zwlr_layer_shell_v1` and one `wl_output`
//! - the layer surface with its configure/acknowledge handshake
//! - pointer input mapped to [`Action`]s, with a themed cursor
//! - a non-blocking dispatch loop with a render callback
//!
//! [`SurfaceManager`] is the entry point. It owns the connection, the event
//! queue and the [`SurfaceState`] every `Dispatch` impl writes into.

mod convert;
mod cursor;
mod draw;
mod error;
mod event_loop;
mod layer;
mod output;
mod registry;
mod seat;
mod state;

pub use draw::{DrawHandler, DrawTarget, NoDraw};
pub use error::InitError;
pub use event_loop::SurfaceManager;
pub use herbew_core::{Action, ActionQueue, ActionSink, ChannelSink, SurfaceConfig, SurfacePhase};
pub use state::SurfaceState;
