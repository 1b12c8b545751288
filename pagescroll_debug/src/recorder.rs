// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! `Vec<RecordedEvent>` in arrival order. Install it behind an
//! `Rc<RefCell<_>>` to keep reading it while a controller owns the sink.

use pagescroll_core::trace::{
    AnimationFinishEvent, AnimationStartEvent, DirectionEvent, FocusEvent, GateEvent,
    ListenersEvent, TraceSink, WheelEvent,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_gate_changed`].
    Gate(GateEvent),
    /// See [`TraceSink::on_scroll_lock`].
    ScrollLock(bool),
    /// See [`TraceSink::on_listeners`].
    Listeners(ListenersEvent),
    /// See [`TraceSink::on_wheel`].
    Wheel(WheelEvent),
    /// See [`TraceSink::on_focus_changed`].
    Focus(FocusEvent),
    /// See [`TraceSink::on_direction`].
    Direction(DirectionEvent),
    /// See [`TraceSink::on_animation_start`].
    AnimationStart(AnimationStartEvent),
    /// See [`TraceSink::on_animation_finish`].
    AnimationFinish(AnimationFinishEvent),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Focus transitions in order, as `(from, to)`.
    #[must_use]
    pub fn focus_path(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Focus(f) => Some((f.from, f.to)),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for RecorderSink {
    fn on_gate_changed(&mut self, e: &GateEvent) {
        self.events.push(RecordedEvent::Gate(*e));
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        self.events.push(RecordedEvent::ScrollLock(locked));
    }

    fn on_listeners(&mut self, e: &ListenersEvent) {
        self.events.push(RecordedEvent::Listeners(*e));
    }

    fn on_wheel(&mut self, e: &WheelEvent) {
        self.events.push(RecordedEvent::Wheel(*e));
    }

    fn on_focus_changed(&mut self, e: &FocusEvent) {
        self.events.push(RecordedEvent::Focus(*e));
    }

    fn on_direction(&mut self, e: &DirectionEvent) {
        self.events.push(RecordedEvent::Direction(*e));
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.events.push(RecordedEvent::AnimationStart(*e));
    }

    fn on_animation_finish(&mut self, e: &AnimationFinishEvent) {
        self.events.push(RecordedEvent::AnimationFinish(*e));
    }
}
