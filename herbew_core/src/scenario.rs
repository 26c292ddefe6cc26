// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end sequences across the state machines, in the order the
//! protocol backend drives them.

use crate::action::{Action, ActionQueue, ActionSink};
use crate::capability::{Capability, CapabilityRegistry, MissingCapability};
use crate::config::SurfaceConfig;
use crate::lifecycle::{SurfaceLifecycle, SurfacePhase};
use crate::output::OutputSelector;
use crate::pointer::{BTN_LEFT, ButtonState, PointerEvent, PointerMachine};

const MANAGED_SURFACE: u32 = 3;

fn negotiate(config: &SurfaceConfig, globals: &[(u32, &str)]) -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new(OutputSelector::from_ordinal(config.output));
    for &(name, interface) in globals {
        let _ = registry.announce(name, interface, 4);
    }
    registry
}

#[test]
fn full_announcement_reaches_active_with_height_as_exclusive_zone() {
    let config = SurfaceConfig::default().with_size(320, 48);
    let registry = negotiate(
        &config,
        &[
            (1, "wl_compositor"),
            (2, "wl_shm"),
            (3, "wl_seat"),
            (4, "zwlr_layer_shell_v1"),
            (5, "wl_output"),
        ],
    );
    assert_eq!(registry.verify(), Ok(()));
    assert!(registry.capabilities().is_bound(Capability::Output));
    assert!(!registry.outputs().passes_output_to_role());

    let placement = config.placement();
    assert_eq!(placement.exclusive_zone, 48);

    let mut lifecycle = SurfaceLifecycle::new();
    assert_eq!(lifecycle.configure(77, 320, 48), Some(77));
    assert!(lifecycle.activate());
    assert_eq!(lifecycle.phase(), SurfacePhase::Active { serial: 77 });
}

#[test]
fn selected_output_is_handed_to_the_role() {
    let config = SurfaceConfig::default().with_output(Some(1));
    let registry = negotiate(
        &config,
        &[
            (1, "wl_compositor"),
            (2, "wl_output"),
            (3, "wl_shm"),
            (4, "wl_output"),
            (5, "zwlr_layer_shell_v1"),
            (6, "wl_output"),
        ],
    );

    assert_eq!(
        registry
            .capabilities()
            .get(Capability::Output)
            .map(|binding| binding.name),
        Some(4)
    );
    assert!(registry.outputs().passes_output_to_role());
}

#[test]
fn missing_layer_shell_is_fatal_but_missing_seat_is_not() {
    let config = SurfaceConfig::default();

    let without_shell = negotiate(&config, &[(1, "wl_compositor"), (2, "wl_shm")]);
    assert_eq!(
        without_shell.verify(),
        Err(MissingCapability(Capability::LayerShell))
    );

    let without_seat = negotiate(
        &config,
        &[(1, "wl_compositor"), (2, "wl_shm"), (3, "zwlr_layer_shell_v1")],
    );
    assert_eq!(without_seat.verify(), Ok(()));
}

#[test]
fn enter_move_press_leave_emits_one_activation() {
    let config = SurfaceConfig::default();
    let mut pointer = PointerMachine::new(MANAGED_SURFACE, config.buttons);
    let mut actions = ActionQueue::default();

    let events = [
        PointerEvent::Enter {
            surface: MANAGED_SURFACE,
            x: 10.0,
            y: 10.0,
        },
        PointerEvent::Motion { x: 50.0, y: 5.0 },
        PointerEvent::Button {
            button: BTN_LEFT,
            state: ButtonState::Pressed,
        },
    ];
    for event in events {
        if let Some(action) = pointer.handle(event) {
            actions.emit(action);
        }
    }
    assert_eq!(pointer.state().position(), Some((50, 5)));
    assert_eq!(actions.drain().collect::<Vec<_>>(), [Action::PrimaryActivate]);

    let _ = pointer.handle(PointerEvent::Leave {
        surface: MANAGED_SURFACE,
    });
    assert!(pointer.state().is_outside());
    assert_eq!(pointer.state().button(), None);

    let after_leave = pointer.handle(PointerEvent::Button {
        button: BTN_LEFT,
        state: ButtonState::Pressed,
    });
    assert_eq!(after_leave, None);
}
