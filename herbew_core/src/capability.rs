// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability negotiation against the compositor's global registry.
//!
//! The compositor announces every protocol interface it offers as a *global*
//! (numeric name, interface string, version). [`CapabilityRegistry`] decides,
//! for each announcement, whether this client binds it:
//!
//! - at most one binding per [`Capability`];
//! - `wl_output` goes through the [`OutputSelector`] countdown;
//! - anything else is ignored.
//!
//! The registry only records *which* global was chosen. The protocol backend
//! performs the actual bind and keeps the typed proxy.
//!
//! After the initial round-trip, [`CapabilityRegistry::verify`] checks that
//! every [mandatory](Capability::is_mandatory) capability was bound.

use core::fmt;

use thiserror::Error;
use tracing::debug;

use crate::output::{OutputDecision, OutputSelector};

/// A protocol interface this client knows how to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// `wl_compositor`, creates surfaces.
    Compositor,
    /// `wl_shm`, shared-memory buffer pools.
    Shm,
    /// `wl_seat`, input devices.
    Seat,
    /// `zwlr_layer_shell_v1`, the layer-shell extension.
    LayerShell,
    /// `wl_output`, a physical display.
    Output,
}

impl Capability {
    /// Every capability, in slot order.
    pub const ALL: [Self; 5] = [
        Self::Compositor,
        Self::Shm,
        Self::Seat,
        Self::LayerShell,
        Self::Output,
    ];

    /// Capabilities whose absence aborts initialization, in the order they
    /// are checked.
    pub const MANDATORY: [Self; 3] = [Self::Compositor, Self::Shm, Self::LayerShell];

    /// Protocol interface name announced by the compositor.
    #[must_use]
    pub const fn interface(self) -> &'static str {
        match self {
            Self::Compositor => "wl_compositor",
            Self::Shm => "wl_shm",
            Self::Seat => "wl_seat",
            Self::LayerShell => "zwlr_layer_shell_v1",
            Self::Output => "wl_output",
        }
    }

    /// Looks up the capability for an announced interface name.
    #[must_use]
    pub fn from_interface(interface: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.interface() == interface)
    }

    /// Highest interface version this client speaks.
    #[must_use]
    pub const fn supported_version(self) -> u32 {
        match self {
            Self::Compositor | Self::LayerShell => 4,
            Self::Shm => 1,
            Self::Seat => 5,
            Self::Output => 2,
        }
    }

    /// Whether initialization must fail when this capability is missing.
    #[must_use]
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Self::Compositor | Self::Shm | Self::LayerShell)
    }

    const fn slot(self) -> usize {
        match self {
            Self::Compositor => 0,
            Self::Shm => 1,
            Self::Seat => 2,
            Self::LayerShell => 3,
            Self::Output => 4,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compositor => "compositor",
            Self::Shm => "shared memory buffer",
            Self::Seat => "seat",
            Self::LayerShell => "layer shell",
            Self::Output => "output",
        };
        f.write_str(label)
    }
}

/// A global chosen for binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Numeric global name from the registry announcement.
    pub name: u32,
    /// Version to bind: the lower of the advertised and supported versions.
    pub version: u32,
}

/// Instruction returned by [`CapabilityRegistry::announce`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindRequest {
    /// Which capability the global provides.
    pub capability: Capability,
    /// Global name and version to bind with.
    pub binding: Binding,
}

/// Which globals are bound, one slot per [`Capability`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    slots: [Option<Binding>; 5],
}

impl CapabilitySet {
    /// Returns the binding for `capability`, if bound.
    #[must_use]
    pub const fn get(&self, capability: Capability) -> Option<Binding> {
        self.slots[capability.slot()]
    }

    /// Returns `true` when `capability` has been bound.
    #[must_use]
    pub const fn is_bound(&self, capability: Capability) -> bool {
        self.get(capability).is_some()
    }

    /// Returns the first unbound mandatory capability, if any.
    #[must_use]
    pub fn first_missing_mandatory(&self) -> Option<Capability> {
        Capability::MANDATORY
            .into_iter()
            .find(|capability| !self.is_bound(*capability))
    }

    fn insert(&mut self, capability: Capability, binding: Binding) {
        self.slots[capability.slot()] = Some(binding);
    }
}

/// A mandatory capability was never announced by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("{0} not available (`{iface}` was not advertised)", iface = .0.interface())]
pub struct MissingCapability(pub Capability);

/// Decides which announced globals to bind.
#[derive(Clone, Debug, Default)]
pub struct CapabilityRegistry {
    bound: CapabilitySet,
    outputs: OutputSelector,
}

impl CapabilityRegistry {
    /// Creates a registry that picks outputs with `outputs`.
    #[must_use]
    pub const fn new(outputs: OutputSelector) -> Self {
        Self {
            bound: CapabilitySet { slots: [None; 5] },
            outputs,
        }
    }

    /// Handles one global announcement.
    ///
    /// Returns the bind to perform, or [`None`] when the global is ignored:
    /// unknown interface, version 0, capability already bound, or an output
    /// the selector skips.
    pub fn announce(&mut self, name: u32, interface: &str, version: u32) -> Option<BindRequest> {
        let capability = Capability::from_interface(interface)?;
        if version == 0 {
            debug!(name, interface, "ignoring global with version 0");
            return None;
        }
        if self.bound.is_bound(capability) {
            debug!(name, interface, "capability already bound, ignoring");
            return None;
        }
        if capability == Capability::Output {
            match self.outputs.offer() {
                OutputDecision::Bind => {}
                OutputDecision::Skip { remaining } => {
                    debug!(name, remaining, "skipping output before selected ordinal");
                    return None;
                }
                OutputDecision::Surplus => return None,
            }
        }

        let binding = Binding {
            name,
            version: version.min(capability.supported_version()),
        };
        self.bound.insert(capability, binding);
        Some(BindRequest {
            capability,
            binding,
        })
    }

    /// Handles a global removal.
    ///
    /// Capabilities are never revoked once bound. The return value only
    /// reports whether the removed global was one of ours.
    pub fn remove(&self, name: u32) -> Option<Capability> {
        let capability = Capability::ALL
            .into_iter()
            .find(|capability| self.bound.get(*capability).is_some_and(|b| b.name == name));
        debug!(name, ?capability, "global removed, no action taken");
        capability
    }

    /// Bound capabilities so far.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.bound
    }

    /// Output selection state.
    #[must_use]
    pub const fn outputs(&self) -> &OutputSelector {
        &self.outputs
    }

    /// Checks that every mandatory capability is bound.
    ///
    /// # Errors
    ///
    /// Returns the first missing mandatory capability, checked in
    /// [`Capability::MANDATORY`] order.
    pub fn verify(&self) -> Result<(), MissingCapability> {
        match self.bound.first_missing_mandatory() {
            Some(capability) => Err(MissingCapability(capability)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Binding, Capability, CapabilityRegistry, CapabilitySet, MissingCapability};
    use crate::output::OutputSelector;

    fn announce_all_but(registry: &mut CapabilityRegistry, skip: Capability) {
        for (name, capability) in (1..).zip(Capability::ALL) {
            if capability != skip {
                let _ = registry.announce(name, capability.interface(), 1);
            }
        }
    }

    #[test]
    fn interface_names_round_trip() {
        for capability in Capability::ALL {
            assert_eq!(
                Capability::from_interface(capability.interface()),
                Some(capability)
            );
        }
        assert_eq!(Capability::from_interface("xdg_wm_base"), None);
    }

    #[test]
    fn binds_at_most_one_handle_per_interface() {
        let mut registry = CapabilityRegistry::default();

        let first = registry.announce(1, "wl_compositor", 6);
        let second = registry.announce(2, "wl_compositor", 6);

        assert!(first.is_some());
        assert_eq!(second, None);
        assert_eq!(
            registry.capabilities().get(Capability::Compositor),
            Some(Binding {
                name: 1,
                version: 4
            })
        );
    }

    #[test]
    fn unknown_interfaces_are_ignored() {
        let mut registry = CapabilityRegistry::default();
        assert_eq!(registry.announce(7, "zxdg_output_manager_v1", 3), None);
        assert_eq!(*registry.capabilities(), CapabilitySet::default());
    }

    #[test]
    fn version_is_clamped_and_zero_is_rejected() {
        let mut registry = CapabilityRegistry::default();

        assert_eq!(registry.announce(1, "wl_seat", 0), None);
        let seat = registry.announce(2, "wl_seat", 9).map(|r| r.binding);
        assert_eq!(
            seat,
            Some(Binding {
                name: 2,
                version: 5
            })
        );

        let shm = registry.announce(3, "wl_shm", 1).map(|r| r.binding.version);
        assert_eq!(shm, Some(1));
    }

    #[test]
    fn missing_mandatory_capability_is_named() {
        for missing in Capability::MANDATORY {
            let mut registry = CapabilityRegistry::default();
            announce_all_but(&mut registry, missing);
            assert_eq!(registry.verify(), Err(MissingCapability(missing)));
        }
    }

    #[test]
    fn optional_capabilities_may_be_absent() {
        let mut registry = CapabilityRegistry::default();
        let _ = registry.announce(1, "wl_compositor", 4);
        let _ = registry.announce(2, "wl_shm", 1);
        let _ = registry.announce(3, "zwlr_layer_shell_v1", 4);

        assert_eq!(registry.verify(), Ok(()));
        assert!(!registry.capabilities().is_bound(Capability::Seat));
        assert!(!registry.capabilities().is_bound(Capability::Output));
    }

    #[test]
    fn selected_output_skips_earlier_outputs() {
        let mut registry = CapabilityRegistry::new(OutputSelector::nth(2));

        assert_eq!(registry.announce(10, "wl_output", 4), None);
        assert_eq!(registry.announce(11, "wl_output", 4), None);
        let third = registry.announce(12, "wl_output", 4);
        assert_eq!(third.map(|r| r.binding.name), Some(12));
        assert_eq!(registry.announce(13, "wl_output", 4), None);
        assert!(registry.outputs().is_target_reached());
    }

    #[test]
    fn unset_selector_binds_first_output() {
        let mut registry = CapabilityRegistry::default();

        let first = registry.announce(10, "wl_output", 2);
        assert_eq!(first.map(|r| r.binding.name), Some(10));
        assert_eq!(registry.announce(11, "wl_output", 2), None);
        assert!(!registry.outputs().is_explicit());
    }

    #[test]
    fn removal_reports_owned_globals_without_unbinding() {
        let mut registry = CapabilityRegistry::default();
        let _ = registry.announce(5, "wl_output", 2);

        assert_eq!(registry.remove(5), Some(Capability::Output));
        assert_eq!(registry.remove(99), None);
        assert!(registry.capabilities().is_bound(Capability::Output));
    }

    #[test]
    fn missing_capability_message_names_interface() {
        let message = MissingCapability(Capability::LayerShell).to_string();
        assert_eq!(
            message,
            "layer shell not available (`zwlr_layer_shell_v1` was not advertised)"
        );
    }
}
