// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between core types and generated protocol types.

use herbew_core::config::{Anchor, Layer};
use herbew_core::pointer::ButtonState;
use wayland_client::WEnum;
use wayland_client::protocol::wl_pointer;
use wayland_protocols_wlr::layer_shell::v1::client::{zwlr_layer_shell_v1, zwlr_layer_surface_v1};

pub(crate) fn layer(layer: Layer) -> zwlr_layer_shell_v1::Layer {
    match layer {
        Layer::Background => zwlr_layer_shell_v1::Layer::Background,
        Layer::Bottom => zwlr_layer_shell_v1::Layer::Bottom,
        Layer::Top => zwlr_layer_shell_v1::Layer::Top,
        Layer::Overlay => zwlr_layer_shell_v1::Layer::Overlay,
    }
}

/// Edge bits are numbered identically in the protocol.
pub(crate) fn anchor(anchor: Anchor) -> zwlr_layer_surface_v1::Anchor {
    zwlr_layer_surface_v1::Anchor::from_bits_truncate(anchor.bits())
}

pub(crate) fn keyboard_interactivity(
    interactive: bool,
) -> zwlr_layer_surface_v1::KeyboardInteractivity {
    if interactive {
        zwlr_layer_surface_v1::KeyboardInteractivity::Exclusive
    } else {
        zwlr_layer_surface_v1::KeyboardInteractivity::None
    }
}

/// Unknown wire values map to [`None`].
pub(crate) fn button_state(state: WEnum<wl_pointer::ButtonState>) -> Option<ButtonState> {
    match state {
        WEnum::Value(wl_pointer::ButtonState::Pressed) => Some(ButtonState::Pressed),
        WEnum::Value(wl_pointer::ButtonState::Released) => Some(ButtonState::Released),
        _ => None,
    }
}
