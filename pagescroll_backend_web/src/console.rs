// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`TraceSink`] that logs to the browser console.

use alloc::format;
use alloc::string::String;

use pagescroll_core::engine::WheelOutcome;
use pagescroll_core::time::{HostTime, Timebase};
use pagescroll_core::trace::{
    AnimationFinishEvent, AnimationStartEvent, DirectionEvent, FocusEvent, GateEvent,
    ListenersEvent, TraceSink, WheelEvent,
};
use wasm_bindgen::JsValue;

/// Writes one `console.log` line per controller event.
///
/// Suppressed wheel events are skipped; they arrive at input rate while the
/// interception window is open.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    timebase: Timebase,
}

impl ConsoleSink {
    /// Creates a sink that formats host times with `timebase`.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self { timebase }
    }

    fn millis(&self, t: HostTime) -> f64 {
        let ns = self.timebase.ticks_to_nanos(t.ticks()) as f64;
        ns / 1_000_000.0
    }

    fn log(line: &str) {
        web_sys::console::log_1(&JsValue::from_str(line));
    }
}

fn outcome_label(outcome: &WheelOutcome) -> String {
    match outcome {
        WheelOutcome::Suppressed => String::from("suppressed"),
        WheelOutcome::PassThrough => String::from("pass"),
        WheelOutcome::Advance { from, to } => format!("advance {from}->{to}"),
    }
}

impl TraceSink for ConsoleSink {
    fn on_gate_changed(&mut self, e: &GateEvent) {
        Self::log(&format!(
            "[pagescroll {:.1}ms] gate {} ({}, {}px)",
            self.millis(e.at),
            if e.eligible { "open" } else { "closed" },
            e.device.as_str(),
            e.viewport_width,
        ));
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        Self::log(if locked {
            "[pagescroll] page scroll locked"
        } else {
            "[pagescroll] page scroll released"
        });
    }

    fn on_listeners(&mut self, e: &ListenersEvent) {
        Self::log(&format!(
            "[pagescroll] listeners -{} +{}",
            e.detached, e.attached
        ));
    }

    fn on_wheel(&mut self, e: &WheelEvent) {
        if matches!(e.outcome, WheelOutcome::Suppressed) {
            return;
        }
        Self::log(&format!(
            "[pagescroll {:.1}ms] wheel section={} dy={} {}",
            self.millis(e.at),
            e.section,
            e.delta_y,
            outcome_label(&e.outcome),
        ));
    }

    fn on_focus_changed(&mut self, e: &FocusEvent) {
        Self::log(&format!(
            "[pagescroll {:.1}ms] focus {} -> {}",
            self.millis(e.at),
            e.from,
            e.to
        ));
    }

    fn on_direction(&mut self, e: &DirectionEvent) {
        Self::log(&format!(
            "[pagescroll] section {} scrolled {} to {}",
            e.section,
            e.direction.as_str(),
            e.offset
        ));
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        Self::log(&format!(
            "[pagescroll {:.1}ms] animation #{} to section {}: {} -> {}",
            self.millis(e.at),
            e.id.0,
            e.section,
            e.start,
            e.target
        ));
    }

    fn on_animation_finish(&mut self, e: &AnimationFinishEvent) {
        Self::log(&format!(
            "[pagescroll {:.1}ms] animation #{} done at {}",
            self.millis(e.at),
            e.id.0,
            e.position
        ));
    }
}
