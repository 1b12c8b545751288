// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the controller.
//!
//! This module provides a [`TraceSink`] trait with one method per controller
//! event. All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] owns an optional boxed [`TraceSink`]. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead) and
//! installed sinks are dropped. When **on**, each method performs a single
//! `Option` branch before dispatching.
//!
//! Sinks shared as `Rc<RefCell<S>>` also implement [`TraceSink`], so a caller
//! can keep a handle to a recorder it installed on a controller.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::animator::AnimationId;
use crate::engine::{Direction, WheelOutcome};
use crate::gate::DeviceClass;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the environment gate opens or closes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateEvent {
    /// When the evaluation ran.
    pub at: HostTime,
    /// New eligibility.
    pub eligible: bool,
    /// Device class the decision was based on.
    pub device: DeviceClass,
    /// Viewport width at evaluation time.
    pub viewport_width: f64,
}

/// Emitted for every wheel event routed to a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// When the event arrived.
    pub at: HostTime,
    /// Section the event was delivered to.
    pub section: usize,
    /// Vertical wheel delta.
    pub delta_y: f64,
    /// What the engine decided.
    pub outcome: WheelOutcome,
}

/// Emitted whenever the focused section changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusEvent {
    /// When focus moved.
    pub at: HostTime,
    /// Previous focus.
    pub from: usize,
    /// New focus.
    pub to: usize,
}

/// Emitted for every inner-scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionEvent {
    /// Section that scrolled.
    pub section: usize,
    /// New inner offset.
    pub offset: f64,
    /// Direction relative to the previous offset.
    pub direction: Direction,
}

/// Emitted when a viewport animation starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationStartEvent {
    /// Animation id.
    pub id: AnimationId,
    /// Section being scrolled to.
    pub section: usize,
    /// Viewport offset at start.
    pub start: f64,
    /// Destination viewport offset.
    pub target: f64,
    /// Start time.
    pub at: HostTime,
    /// Animation length.
    pub duration: Duration,
}

/// Emitted on an animation's final frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFinishEvent {
    /// Animation id.
    pub id: AnimationId,
    /// Final viewport offset written.
    pub position: i64,
    /// Frame time.
    pub at: HostTime,
}

/// Emitted after listeners are re-subscribed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenersEvent {
    /// Sections whose listeners were removed.
    pub detached: usize,
    /// Sections whose listeners were added.
    pub attached: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the gate opens or closes.
    fn on_gate_changed(&mut self, e: &GateEvent) {
        _ = e;
    }

    /// Called when the page scroll lock is engaged or released.
    fn on_scroll_lock(&mut self, locked: bool) {
        _ = locked;
    }

    /// Called after listeners are reconciled.
    fn on_listeners(&mut self, e: &ListenersEvent) {
        _ = e;
    }

    /// Called for every routed wheel event.
    fn on_wheel(&mut self, e: &WheelEvent) {
        _ = e;
    }

    /// Called when focus changes.
    fn on_focus_changed(&mut self, e: &FocusEvent) {
        _ = e;
    }

    /// Called for every inner-scroll event.
    fn on_direction(&mut self, e: &DirectionEvent) {
        _ = e;
    }

    /// Called when an animation starts.
    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        _ = e;
    }

    /// Called on an animation's last frame.
    fn on_animation_finish(&mut self, e: &AnimationFinishEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Rc<RefCell<S>> {
    fn on_gate_changed(&mut self, e: &GateEvent) {
        self.borrow_mut().on_gate_changed(e);
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        self.borrow_mut().on_scroll_lock(locked);
    }

    fn on_listeners(&mut self, e: &ListenersEvent) {
        self.borrow_mut().on_listeners(e);
    }

    fn on_wheel(&mut self, e: &WheelEvent) {
        self.borrow_mut().on_wheel(e);
    }

    fn on_focus_changed(&mut self, e: &FocusEvent) {
        self.borrow_mut().on_focus_changed(e);
    }

    fn on_direction(&mut self, e: &DirectionEvent) {
        self.borrow_mut().on_direction(e);
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.borrow_mut().on_animation_start(e);
    }

    fn on_animation_finish(&mut self, e: &AnimationFinishEvent) {
        self.borrow_mut().on_animation_finish(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($(#[$doc:meta])* $name:ident => $method:ident($arg:ident: $ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, $arg: $ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method($arg);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = $arg;
            }
        }
    };
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    dispatch!(
        /// Emits a [`GateEvent`].
        gate_changed => on_gate_changed(e: &GateEvent)
    );
    dispatch!(
        /// Emits a scroll-lock change.
        scroll_lock => on_scroll_lock(locked: bool)
    );
    dispatch!(
        /// Emits a [`ListenersEvent`].
        listeners => on_listeners(e: &ListenersEvent)
    );
    dispatch!(
        /// Emits a [`WheelEvent`].
        wheel => on_wheel(e: &WheelEvent)
    );
    dispatch!(
        /// Emits a [`FocusEvent`].
        focus_changed => on_focus_changed(e: &FocusEvent)
    );
    dispatch!(
        /// Emits a [`DirectionEvent`].
        direction => on_direction(e: &DirectionEvent)
    );
    dispatch!(
        /// Emits an [`AnimationStartEvent`].
        animation_start => on_animation_start(e: &AnimationStartEvent)
    );
    dispatch!(
        /// Emits an [`AnimationFinishEvent`].
        animation_finish => on_animation_finish(e: &AnimationFinishEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_focus() -> FocusEvent {
        FocusEvent {
            at: HostTime(10),
            from: 0,
            to: 1,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_focus_changed(&sample_focus());
        sink.on_scroll_lock(true);
        sink.on_listeners(&ListenersEvent {
            detached: 0,
            attached: 3,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.focus_changed(&sample_focus());
        tracer.scroll_lock(false);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_shared_sink() {
        use alloc::vec::Vec;

        #[derive(Default)]
        struct FocusLog {
            moves: Vec<(usize, usize)>,
        }
        impl TraceSink for FocusLog {
            fn on_focus_changed(&mut self, e: &FocusEvent) {
                self.moves.push((e.from, e.to));
            }
        }

        let log = Rc::new(RefCell::new(FocusLog::default()));
        let mut tracer = Tracer::new(Box::new(Rc::clone(&log)));
        tracer.focus_changed(&sample_focus());
        tracer.wheel(&WheelEvent {
            at: HostTime(0),
            section: 0,
            delta_y: 1.0,
            outcome: WheelOutcome::PassThrough,
        });
        assert_eq!(log.borrow().moves, [(0, 1)]);
    }
}
