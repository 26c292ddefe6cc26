// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Initialization failures.

use herbew_core::{ConfigError, MissingCapability};
use thiserror::Error;
use wayland_client::{ConnectError, DispatchError};

/// Fatal error while bringing up the overlay surface.
///
/// There is no degraded mode: any of these means the surface does not exist
/// and everything acquired so far has been released.
#[derive(Debug, Error)]
pub enum InitError {
    /// The compositor socket could not be reached.
    #[error("failed to connect to the compositor: {0}")]
    Connect(#[from] ConnectError),
    /// The placement violates layer-shell rules.
    #[error("invalid surface configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A mandatory global was not advertised.
    #[error(transparent)]
    MissingCapability(#[from] MissingCapability),
    /// A synchronizing round-trip failed.
    #[error("round-trip with the compositor failed: {0}")]
    Dispatch(#[from] DispatchError),
    /// The initial round-trip completed without a configure event.
    #[error("compositor did not configure the layer surface")]
    NotConfigured,
}
