// Copyright 2026 the Herbew Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abstract user actions and their delivery to the owning process.
//!
//! The pointer state machine emits [`Action`]s into an [`ActionSink`].
//! Emission is fire-and-forget: a sink must never block the dispatch thread.
//! Three sinks are provided:
//!
//! - any `FnMut(Action)` closure;
//! - [`ActionQueue`], a bounded in-process queue polled by the host loop;
//! - [`ChannelSink`], a bounded [`std::sync::mpsc`] channel for hosts that
//!   consume actions on another thread.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};

use tracing::warn;

/// A discrete user action on the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Primary button pressed over the surface (open, follow, activate).
    PrimaryActivate,
    /// Secondary button pressed over the surface (close, dismiss).
    SecondaryDismiss,
}

impl Action {
    /// Short stable label, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryActivate => "primary-activate",
            Self::SecondaryDismiss => "secondary-dismiss",
        }
    }
}

/// Receives actions without blocking.
pub trait ActionSink {
    /// Delivers one action. Must return promptly.
    fn emit(&mut self, action: Action);
}

impl<F: FnMut(Action)> ActionSink for F {
    fn emit(&mut self, action: Action) {
        self(action);
    }
}

/// Bounded FIFO of pending actions.
///
/// Overflow policy is `drop_oldest`: when full, emitting a new action removes
/// the oldest pending one first, so the most recent user intent is kept when
/// the host falls behind.
#[derive(Debug, Clone)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
    capacity: usize,
    dropped: u64,
}

impl ActionQueue {
    /// Default queue capacity used by [`Default`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Creates a queue with an explicit capacity.
    ///
    /// `capacity == 0` is promoted to `1`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Pops the oldest pending action, if any.
    pub fn pop(&mut self) -> Option<Action> {
        self.pending.pop_front()
    }

    /// Removes and yields every pending action, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.pending.drain(..)
    }

    /// Returns the current queue length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when no actions are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of actions dropped due to queue overflow.
    #[must_use]
    pub const fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl ActionSink for ActionQueue {
    fn emit(&mut self, action: Action) {
        if self.pending.len() == self.capacity
            && let Some(oldest) = self.pending.pop_front()
        {
            self.dropped += 1;
            warn!(
                dropped = oldest.as_str(),
                total = self.dropped,
                "action queue full, dropping oldest"
            );
        }
        self.pending.push_back(action);
    }
}

/// Sends actions over a bounded channel with `try_send`.
///
/// A full or disconnected channel drops the action and logs a warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: SyncSender<Action>,
}

impl ChannelSink {
    /// Wraps an existing sender.
    #[must_use]
    pub const fn new(sender: SyncSender<Action>) -> Self {
        Self { sender }
    }

    /// Creates a channel of `capacity` and returns both ends.
    ///
    /// `capacity == 0` is promoted to `1`.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, Receiver<Action>) {
        let (sender, receiver) = sync_channel(capacity.max(1));
        (Self::new(sender), receiver)
    }
}

impl ActionSink for ChannelSink {
    fn emit(&mut self, action: Action) {
        match self.sender.try_send(action) {
            Ok(()) => {}
            Err(TrySendError::Full(action)) => {
                warn!(action = action.as_str(), "action channel full, dropping");
            }
            Err(TrySendError::Disconnected(action)) => {
                warn!(action = action.as_str(), "action receiver gone, dropping");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ActionQueue, ActionSink, ChannelSink};

    #[test]
    fn queue_overflow_drops_oldest_action() {
        let mut queue = ActionQueue::with_capacity(2);
        queue.emit(Action::PrimaryActivate);
        queue.emit(Action::SecondaryDismiss);
        queue.emit(Action::PrimaryActivate);

        assert_eq!(queue.pop(), Some(Action::SecondaryDismiss));
        assert_eq!(queue.pop(), Some(Action::PrimaryActivate));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.dropped_count(), 1);
    }

    #[test]
    fn zero_capacity_queue_keeps_latest_action() {
        let mut queue = ActionQueue::with_capacity(0);
        queue.emit(Action::PrimaryActivate);
        queue.emit(Action::SecondaryDismiss);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(Action::SecondaryDismiss));
        assert_eq!(queue.dropped_count(), 1);
    }

    #[test]
    fn drain_yields_clicks_in_order_and_empties() {
        let mut queue = ActionQueue::default();
        queue.emit(Action::PrimaryActivate);
        queue.emit(Action::PrimaryActivate);
        queue.emit(Action::SecondaryDismiss);

        assert_eq!(
            queue.drain().collect::<Vec<_>>(),
            [
                Action::PrimaryActivate,
                Action::PrimaryActivate,
                Action::SecondaryDismiss
            ]
        );
        assert!(queue.is_empty());
        assert_eq!(queue.dropped_count(), 0);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |action: Action| seen.push(action);
        sink.emit(Action::SecondaryDismiss);

        assert_eq!(seen, [Action::SecondaryDismiss]);
    }

    #[test]
    fn channel_sink_never_blocks_when_full() {
        let (mut sink, receiver) = ChannelSink::bounded(1);
        sink.emit(Action::PrimaryActivate);
        sink.emit(Action::SecondaryDismiss);

        assert_eq!(receiver.try_recv(), Ok(Action::PrimaryActivate));
        assert!(receiver.try_recv().is_err(), "second action should be dropped");
    }

    #[test]
    fn channel_sink_survives_disconnected_receiver() {
        let (mut sink, receiver) = ChannelSink::bounded(4);
        drop(receiver);
        sink.emit(Action::PrimaryActivate);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Action::PrimaryActivate.as_str(), "primary-activate");
        assert_eq!(Action::SecondaryDismiss.as_str(), "secondary-dismiss");
    }
}
