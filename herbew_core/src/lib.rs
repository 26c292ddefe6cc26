// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Protocol-free state machines for a single layer-shell overlay surface.
//!
//! `herbew_core` holds every decision the overlay client makes, with no
//! dependency on a Wayland implementation. The `herbew_wayland` crate feeds
//! it decoded protocol events and performs the requests it asks for.
//!
//! # Architecture
//!
//! ```text
//!   registry globals ──► CapabilityRegistry ──► BindRequest (backend binds)
//!                              │
//!                        verify() ── MissingCapability ──► fatal
//!                              │
//!   SurfaceConfig ──► Placement ──► layer surface requests, first commit
//!                              │
//!   configure(serial) ──► SurfaceLifecycle ──► ack_configure(serial)
//!                              │
//!   pointer events ──► PointerMachine ──► Action ──► ActionSink
//! ```
//!
//! **[`capability`]**: one binding per interface, mandatory-capability
//! verification.
//!
//! **[`output`]**: countdown selection of one output by ordinal.
//!
//! **[`config`]**: host-supplied placement values and their validation.
//!
//! **[`lifecycle`]**: configure/acknowledge handshake and terminal close.
//!
//! **[`pointer`]**: enter/leave/motion/button tracking and action mapping.
//!
//! **[`action`]**: the two user actions and non-blocking sinks for them.
//!
//! # Crate features
//!
//! - `serde` (disabled by default): derives `Serialize` and `Deserialize` for configuration
//!   types.

pub mod action;
pub mod capability;
pub mod config;
pub mod lifecycle;
pub mod output;
pub mod pointer;

#[cfg(test)]
mod scenario;

pub use action::{Action, ActionQueue, ActionSink, ChannelSink};
pub use capability::{Capability, CapabilityRegistry, MissingCapability};
pub use config::{ConfigError, SurfaceConfig};
pub use lifecycle::{SurfaceLifecycle, SurfacePhase};
pub use output::OutputSelector;
pub use pointer::{PointerEvent, PointerMachine};
