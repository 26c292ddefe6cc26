// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer-surface configure/acknowledge lifecycle.
//!
//! ```text
//!   Unconfigured ──configure(S)──► Acknowledged { S } ──activate()──► Active { S }
//!        │                                │                            │  ▲
//!        │                                │                configure(S')└──┘
//!        └────────────closed──────────────┴─────────closed─────────────┴──► Destroyed
//! ```
//!
//! Every configure is answered with an acknowledgment carrying exactly the
//! serial it delivered. `Destroyed` is terminal: later events are ignored and
//! nothing is re-created.

/// Where the layer surface is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfacePhase {
    /// Role created and committed, no configure received yet.
    #[default]
    Unconfigured,
    /// First configure acknowledged, initial round-trip not yet complete.
    Acknowledged {
        /// Serial of the acknowledged configure.
        serial: u32,
    },
    /// Steady state; content may be drawn.
    Active {
        /// Serial of the most recently acknowledged configure.
        serial: u32,
    },
    /// The compositor closed the surface. Terminal.
    Destroyed,
}

/// Tracks [`SurfacePhase`] plus the size the compositor last configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceLifecycle {
    phase: SurfacePhase,
    configured_size: Option<(u32, u32)>,
}

impl SurfaceLifecycle {
    /// Creates an unconfigured lifecycle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SurfacePhase::Unconfigured,
            configured_size: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Size from the latest configure, `(0, 0)` components meaning "client
    /// decides".
    #[must_use]
    pub const fn configured_size(&self) -> Option<(u32, u32)> {
        self.configured_size
    }

    /// Whether the surface is in its steady state.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, SurfacePhase::Active { .. })
    }

    /// Whether the surface has been closed.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        matches!(self.phase, SurfacePhase::Destroyed)
    }

    /// Handles a configure event.
    ///
    /// Returns the serial to acknowledge, or [`None`] after destruction.
    pub fn configure(&mut self, serial: u32, width: u32, height: u32) -> Option<u32> {
        self.phase = match self.phase {
            SurfacePhase::Destroyed => return None,
            SurfacePhase::Unconfigured | SurfacePhase::Acknowledged { .. } => {
                SurfacePhase::Acknowledged { serial }
            }
            SurfacePhase::Active { .. } => SurfacePhase::Active { serial },
        };
        self.configured_size = Some((width, height));
        Some(serial)
    }

    /// Promotes an acknowledged surface to [`SurfacePhase::Active`].
    ///
    /// Returns `true` when the surface is active afterwards.
    pub fn activate(&mut self) -> bool {
        if let SurfacePhase::Acknowledged { serial } = self.phase {
            self.phase = SurfacePhase::Active { serial };
        }
        self.is_active()
    }

    /// Handles a closed event.
    ///
    /// Returns `true` if this call destroyed a live surface, meaning the
    /// caller must now release its handles.
    pub fn close(&mut self) -> bool {
        let was_live = !self.is_destroyed();
        self.phase = SurfacePhase::Destroyed;
        was_live
    }
}

#[cfg(test)]
mod tests {
    use super::{SurfaceLifecycle, SurfacePhase};

    #[test]
    fn configure_acknowledges_its_own_serial() {
        let mut lifecycle = SurfaceLifecycle::new();

        assert_eq!(lifecycle.configure(4242, 400, 60), Some(4242));
        assert_eq!(
            lifecycle.phase(),
            SurfacePhase::Acknowledged { serial: 4242 }
        );
        assert_eq!(lifecycle.configured_size(), Some((400, 60)));
    }

    #[test]
    fn activation_requires_an_acknowledged_configure() {
        let mut lifecycle = SurfaceLifecycle::new();
        assert!(!lifecycle.activate());
        assert_eq!(lifecycle.phase(), SurfacePhase::Unconfigured);

        let _ = lifecycle.configure(1, 0, 0);
        assert!(lifecycle.activate());
        assert_eq!(lifecycle.phase(), SurfacePhase::Active { serial: 1 });
    }

    #[test]
    fn reconfigure_while_active_stays_active() {
        let mut lifecycle = SurfaceLifecycle::new();
        let _ = lifecycle.configure(1, 400, 60);
        let _ = lifecycle.activate();

        assert_eq!(lifecycle.configure(9, 800, 60), Some(9));
        assert_eq!(lifecycle.phase(), SurfacePhase::Active { serial: 9 });
        assert_eq!(lifecycle.configured_size(), Some((800, 60)));
    }

    #[test]
    fn closed_is_terminal() {
        let mut lifecycle = SurfaceLifecycle::new();
        let _ = lifecycle.configure(1, 400, 60);
        let _ = lifecycle.activate();

        assert!(lifecycle.close());
        assert!(!lifecycle.close(), "second close must not release twice");
        assert_eq!(lifecycle.configure(2, 400, 60), None);
        assert!(!lifecycle.activate());
        assert!(lifecycle.is_destroyed());
    }

    #[test]
    fn never_configured_surface_cannot_activate() {
        let mut lifecycle = SurfaceLifecycle::new();

        assert!(!lifecycle.activate());
        assert!(!lifecycle.activate());
        assert_eq!(lifecycle.phase(), SurfacePhase::Unconfigured);
        assert_eq!(lifecycle.configured_size(), None);
    }

    #[test]
    fn close_before_configure_destroys() {
        let mut lifecycle = SurfaceLifecycle::new();
        assert!(lifecycle.close());
        assert_eq!(lifecycle.phase(), SurfacePhase::Destroyed);
    }
}
