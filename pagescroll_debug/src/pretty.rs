// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use pagescroll_core::engine::WheelOutcome;
use pagescroll_core::time::{Duration, HostTime, Timebase};
use pagescroll_core::trace::{
    AnimationFinishEvent, AnimationStartEvent, DirectionEvent, FocusEvent, GateEvent,
    ListenersEvent, TraceSink, WheelEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ticks_to_ms(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1_000_000.0
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.ticks_to_ms(t.ticks())
    }

    fn duration_ms(&self, d: Duration) -> f64 {
        self.ticks_to_ms(d.ticks())
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_gate_changed(&mut self, e: &GateEvent) {
        let state = if e.eligible { "open" } else { "closed" };
        let _ = writeln!(
            self.writer,
            "[gate] {state} device={} width={}px at {:.1}ms",
            e.device.as_str(),
            e.viewport_width,
            self.host_ms(e.at),
        );
    }

    fn on_scroll_lock(&mut self, locked: bool) {
        let state = if locked { "engaged" } else { "released" };
        let _ = writeln!(self.writer, "[lock] {state}");
    }

    fn on_listeners(&mut self, e: &ListenersEvent) {
        let _ = writeln!(
            self.writer,
            "[listeners] detached={} attached={}",
            e.detached, e.attached,
        );
    }

    fn on_wheel(&mut self, e: &WheelEvent) {
        let outcome = match e.outcome {
            WheelOutcome::Suppressed => "suppressed".to_owned(),
            WheelOutcome::PassThrough => "pass".to_owned(),
            WheelOutcome::Advance { from, to } => format!("advance {from}->{to}"),
        };
        let _ = writeln!(
            self.writer,
            "[wheel] section={} dy={} {outcome} at {:.1}ms",
            e.section,
            e.delta_y,
            self.host_ms(e.at),
        );
    }

    fn on_focus_changed(&mut self, e: &FocusEvent) {
        let _ = writeln!(
            self.writer,
            "[focus] {} -> {} at {:.1}ms",
            e.from,
            e.to,
            self.host_ms(e.at),
        );
    }

    fn on_direction(&mut self, e: &DirectionEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll] section={} offset={} {}",
            e.section,
            e.offset,
            e.direction.as_str(),
        );
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        let _ = writeln!(
            self.writer,
            "[anim:start] #{} section={} {} -> {} over {:.0}ms at {:.1}ms",
            e.id.0,
            e.section,
            e.start,
            e.target,
            self.duration_ms(e.duration),
            self.host_ms(e.at),
        );
    }

    fn on_animation_finish(&mut self, e: &AnimationFinishEvent) {
        let _ = writeln!(
            self.writer,
            "[anim:end] #{} position={} at {:.1}ms",
            e.id.0,
            e.position,
            self.host_ms(e.at),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagescroll_core::animator::AnimationId;
    use pagescroll_core::gate::DeviceClass;

    #[test]
    fn pretty_print_gate() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_gate_changed(&GateEvent {
            at: HostTime(2_500),
            eligible: true,
            device: DeviceClass::Desktop,
            viewport_width: 1280.0,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[gate] open"), "got: {output}");
        assert!(output.contains("device=desktop"), "got: {output}");
        assert!(output.contains("at 2.5ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_animation_lifecycle() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_animation_start(&AnimationStartEvent {
            id: AnimationId(3),
            section: 1,
            start: 0.0,
            target: 900.0,
            at: HostTime(0),
            duration: Duration(1_000_000),
        });
        sink.on_animation_finish(&AnimationFinishEvent {
            id: AnimationId(3),
            position: 900,
            at: HostTime(1_000_000),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert!(lines[0].contains("over 1000ms"), "got: {output}");
        assert!(lines[1].starts_with("[anim:end] #3 position=900"), "got: {output}");
    }
}
