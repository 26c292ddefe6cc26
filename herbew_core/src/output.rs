// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output selection by announcement ordinal.
//!
//! Outputs are announced one by one during registry negotiation.
//! [`OutputSelector`] counts down from the configured ordinal: each output
//! seen before the target is skipped, the target is bound, and every output
//! after it is surplus.
//!
//! With no ordinal configured the first announced output is bound, but the
//! layer surface is created without an output so the compositor picks one.

/// The outcome of offering one announced output to the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputDecision {
    /// Bind this output.
    Bind,
    /// Not the target yet; `remaining` more outputs will be skipped.
    Skip {
        /// Outputs still to skip after this one.
        remaining: u32,
    },
    /// An output was already bound.
    Surplus,
}

/// Countdown selecting one output by its position among announced outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputSelector {
    /// Configured ordinal, [`None`] for "compositor default".
    target: Option<u32>,
    /// Outputs left to skip before binding.
    remaining: u32,
    /// Whether an output was bound.
    bound: bool,
}

impl OutputSelector {
    /// Selector that leaves output choice to the compositor.
    #[must_use]
    pub const fn compositor_default() -> Self {
        Self {
            target: None,
            remaining: 0,
            bound: false,
        }
    }

    /// Selector that binds the output at zero-based position `ordinal`.
    #[must_use]
    pub const fn nth(ordinal: u32) -> Self {
        Self {
            target: Some(ordinal),
            remaining: ordinal,
            bound: false,
        }
    }

    /// Builds a selector from an optional ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: Option<u32>) -> Self {
        match ordinal {
            Some(ordinal) => Self::nth(ordinal),
            None => Self::compositor_default(),
        }
    }

    /// Offers the next announced output.
    pub fn offer(&mut self) -> OutputDecision {
        if self.bound {
            return OutputDecision::Surplus;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return OutputDecision::Skip {
                remaining: self.remaining,
            };
        }
        self.bound = true;
        OutputDecision::Bind
    }

    /// Whether an ordinal was configured.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.target.is_some()
    }

    /// The configured ordinal, if any.
    #[must_use]
    pub const fn target(&self) -> Option<u32> {
        self.target
    }

    /// Whether an output has been bound.
    #[must_use]
    pub const fn is_target_reached(&self) -> bool {
        self.bound
    }

    /// Whether the bound output should be passed to the layer surface.
    ///
    /// Only an explicitly selected output is passed. Otherwise the layer
    /// surface gets no output and the compositor chooses.
    #[must_use]
    pub const fn passes_output_to_role(&self) -> bool {
        self.is_explicit() && self.bound
    }
}
