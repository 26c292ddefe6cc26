// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement configuration for the overlay surface.
//!
//! [`SurfaceConfig`] carries every value the host supplies before
//! initialization. [`SurfaceConfig::placement`] resolves it into the exact
//! [`Placement`] pushed to the layer surface before its first commit. The
//! placement is never changed afterwards.

use thiserror::Error;

use crate::pointer::ButtonMap;

/// Default layer-surface namespace.
pub const DEFAULT_NAMESPACE: &str = "herbew";

/// Default cursor theme size in pixels.
pub const DEFAULT_CURSOR_SIZE: u32 = 16;

/// Stacking layer of the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Layer {
    /// Below everything, like a wallpaper.
    Background,
    /// Below windows.
    Bottom,
    /// Above windows, below fullscreen content.
    #[default]
    Top,
    /// Above everything, fullscreen included.
    Overlay,
}

bitflags::bitflags! {
    /// Screen edges the surface is anchored to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Anchor: u32 {
        /// Top edge.
        const TOP = 1;
        /// Bottom edge.
        const BOTTOM = 2;
        /// Left edge.
        const LEFT = 4;
        /// Right edge.
        const RIGHT = 8;
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP | Self::RIGHT
    }
}

/// Distance from each anchored edge, in surface-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    /// Top margin.
    pub top: i32,
    /// Right margin.
    pub right: i32,
    /// Bottom margin.
    pub bottom: i32,
    /// Left margin.
    pub left: i32,
}

impl Margins {
    /// The same margin on all four sides.
    #[must_use]
    pub const fn uniform(margin: i32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// How much screen space the surface reserves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExclusiveZone {
    /// Reserve exactly the surface height.
    #[default]
    MatchHeight,
    /// Explicit protocol value: positive reserves pixels, `0` reserves
    /// nothing, `-1` ignores other surfaces' zones.
    Fixed(i32),
}

/// Everything the host configures before initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Surface width in pixels. `0` stretches between left and right anchors.
    pub width: u32,
    /// Surface height in pixels. `0` stretches between top and bottom anchors.
    pub height: u32,
    /// Anchored edges.
    pub anchor: Anchor,
    /// Per-edge margins.
    pub margins: Margins,
    /// Stacking layer.
    pub layer: Layer,
    /// Reserved screen space.
    pub exclusive_zone: ExclusiveZone,
    /// Whether the surface may take keyboard focus.
    pub keyboard_interactive: bool,
    /// Layer-surface namespace identifying this client to the compositor.
    pub namespace: String,
    /// Zero-based ordinal of the output to appear on; [`None`] lets the
    /// compositor choose.
    pub output: Option<u32>,
    /// Button codes mapped to actions.
    pub buttons: ButtonMap,
    /// Cursor theme size in pixels.
    pub cursor_size: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 60,
            anchor: Anchor::default(),
            margins: Margins::default(),
            layer: Layer::Top,
            exclusive_zone: ExclusiveZone::MatchHeight,
            keyboard_interactive: false,
            namespace: DEFAULT_NAMESPACE.to_owned(),
            output: None,
            buttons: ButtonMap::default(),
            cursor_size: DEFAULT_CURSOR_SIZE,
        }
    }
}

/// A configuration the layer-shell protocol would reject.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Width is zero but the surface is not anchored to both left and right.
    #[error("width 0 requires anchoring to both left and right edges")]
    UnboundedWidth,
    /// Height is zero but the surface is not anchored to both top and bottom.
    #[error("height 0 requires anchoring to both top and bottom edges")]
    UnboundedHeight,
    /// The namespace is empty.
    #[error("layer surface namespace must not be empty")]
    EmptyNamespace,
    /// Primary and secondary actions share a button code.
    #[error("primary and secondary actions both use button {0:#x}")]
    AmbiguousButtons(u32),
}

/// Resolved layer-surface placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Requested `(width, height)`.
    pub size: (u32, u32),
    /// Anchored edges.
    pub anchor: Anchor,
    /// Exclusive zone in pixels, protocol semantics.
    pub exclusive_zone: i32,
    /// Per-edge margins.
    pub margins: Margins,
    /// Whether keyboard focus is requested.
    pub keyboard_interactive: bool,
    /// Stacking layer.
    pub layer: Layer,
}

impl SurfaceConfig {
    /// Sets the surface size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the anchored edges.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the stacking layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the exclusive zone policy.
    #[must_use]
    pub fn with_exclusive_zone(mut self, zone: ExclusiveZone) -> Self {
        self.exclusive_zone = zone;
        self
    }

    /// Selects an output by zero-based ordinal.
    #[must_use]
    pub fn with_output(mut self, output: Option<u32>) -> Self {
        self.output = output;
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the button map.
    #[must_use]
    pub fn with_buttons(mut self, buttons: ButtonMap) -> Self {
        self.buttons = buttons;
        self
    }

    /// Checks the configuration against layer-shell protocol rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the configuration breaks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 && !self.anchor.contains(Anchor::LEFT | Anchor::RIGHT) {
            return Err(ConfigError::UnboundedWidth);
        }
        if self.height == 0 && !self.anchor.contains(Anchor::TOP | Anchor::BOTTOM) {
            return Err(ConfigError::UnboundedHeight);
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.buttons.primary == self.buttons.secondary {
            return Err(ConfigError::AmbiguousButtons(self.buttons.primary));
        }
        Ok(())
    }

    /// Resolves the placement pushed to the layer surface.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let exclusive_zone = match self.exclusive_zone {
            ExclusiveZone::MatchHeight => i32::try_from(self.height).unwrap_or(i32::MAX),
            ExclusiveZone::Fixed(zone) => zone,
        };
        Placement {
            size: (self.width, self.height),
            anchor: self.anchor,
            exclusive_zone,
            margins: self.margins,
            keyboard_interactive: self.keyboard_interactive,
            layer: self.layer,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::{Anchor, ExclusiveZone, Layer, Margins, SurfaceConfig};

    #[test]
    fn stretched_overlay_config_round_trips() {
        let config = SurfaceConfig::default()
            .with_size(0, 32)
            .with_anchor(Anchor::TOP | Anchor::LEFT | Anchor::RIGHT)
            .with_margins(Margins::uniform(6))
            .with_exclusive_zone(ExclusiveZone::Fixed(-1))
            .with_layer(Layer::Overlay)
            .with_output(Some(1));

        let json = serde_json::to_string(&config).expect("config serializes");
        let parsed: SurfaceConfig = serde_json::from_str(&json).expect("config deserializes");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed: SurfaceConfig = serde_json::from_str(
            r#"{
                "height": 30,
                "anchor": "BOTTOM | LEFT",
                "exclusive_zone": "match_height",
                "layer": "bottom"
            }"#,
        )
        .expect("partial config deserializes");

        assert_eq!(parsed.width, 400);
        assert_eq!(parsed.height, 30);
        assert_eq!(parsed.anchor, Anchor::BOTTOM | Anchor::LEFT);
        assert_eq!(parsed.layer, Layer::Bottom);
        assert_eq!(parsed.namespace, "herbew");
        assert_eq!(parsed.placement().exclusive_zone, 30);
    }
}
