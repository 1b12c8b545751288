// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events collected by a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Viewport animations become async slices (`b`/`e`) keyed by animation id;
//! everything else is an instant event. Events that carry no timestamp of
//! their own (lock, listeners, inner scroll) are placed at the most recent
//! timestamp seen before them.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use pagescroll_core::engine::WheelOutcome;
use pagescroll_core::time::{HostTime, Timebase};

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(
    recorded: &[RecordedEvent],
    timebase: Timebase,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::with_capacity(recorded.len());
    let mut last = HostTime(0);

    for event in recorded {
        match event {
            RecordedEvent::Gate(e) => {
                last = e.at;
                events.push(instant(
                    "Gate",
                    "Gate",
                    host_us(e.at, timebase),
                    json!({
                        "eligible": e.eligible,
                        "device": e.device.as_str(),
                        "viewport_width": e.viewport_width,
                    }),
                ));
            }
            RecordedEvent::ScrollLock(locked) => {
                events.push(instant(
                    "ScrollLock",
                    "Gate",
                    host_us(last, timebase),
                    json!({ "locked": locked }),
                ));
            }
            RecordedEvent::Listeners(e) => {
                events.push(instant(
                    "Listeners",
                    "Gate",
                    host_us(last, timebase),
                    json!({ "detached": e.detached, "attached": e.attached }),
                ));
            }
            RecordedEvent::Wheel(e) => {
                last = e.at;
                let outcome = match e.outcome {
                    WheelOutcome::Suppressed => "suppressed",
                    WheelOutcome::PassThrough => "pass",
                    WheelOutcome::Advance { .. } => "advance",
                };
                events.push(instant(
                    "Wheel",
                    "Input",
                    host_us(e.at, timebase),
                    json!({
                        "section": e.section,
                        "delta_y": e.delta_y,
                        "outcome": outcome,
                    }),
                ));
            }
            RecordedEvent::Focus(e) => {
                last = e.at;
                events.push(instant(
                    "Focus",
                    "Engine",
                    host_us(e.at, timebase),
                    json!({ "from": e.from, "to": e.to }),
                ));
            }
            RecordedEvent::Direction(e) => {
                events.push(instant(
                    "InnerScroll",
                    "Input",
                    host_us(last, timebase),
                    json!({
                        "section": e.section,
                        "offset": e.offset,
                        "direction": e.direction.as_str(),
                    }),
                ));
            }
            RecordedEvent::AnimationStart(e) => {
                last = e.at;
                events.push(json!({
                    "ph": "b",
                    "name": "Animation",
                    "cat": "Animation",
                    "id": e.id.0,
                    "ts": host_us(e.at, timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "section": e.section,
                        "start": e.start,
                        "target": e.target,
                        "duration_us": ticks_to_us(e.duration.ticks(), timebase),
                    }
                }));
            }
            RecordedEvent::AnimationFinish(e) => {
                last = e.at;
                events.push(json!({
                    "ph": "e",
                    "name": "Animation",
                    "cat": "Animation",
                    "id": e.id.0,
                    "ts": host_us(e.at, timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "position": e.position,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "g",
        "args": args,
    })
}

fn host_us(t: HostTime, timebase: Timebase) -> f64 {
    ticks_to_us(t.ticks(), timebase)
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use pagescroll_core::animator::AnimationId;
    use pagescroll_core::time::Duration;
    use pagescroll_core::trace::{
        AnimationFinishEvent, AnimationStartEvent, FocusEvent, TraceSink, WheelEvent,
    };

    fn transition() -> RecorderSink {
        let mut rec = RecorderSink::new();
        rec.on_wheel(&WheelEvent {
            at: HostTime(1_000),
            section: 0,
            delta_y: 100.0,
            outcome: WheelOutcome::Advance { from: 0, to: 1 },
        });
        rec.on_focus_changed(&FocusEvent {
            at: HostTime(1_000),
            from: 0,
            to: 1,
        });
        rec.on_animation_start(&AnimationStartEvent {
            id: AnimationId(0),
            section: 1,
            start: 0.0,
            target: 900.0,
            at: HostTime(1_000),
            duration: Duration(1_000_000),
        });
        rec.on_scroll_lock(true);
        rec.on_animation_finish(&AnimationFinishEvent {
            id: AnimationId(0),
            position: 900,
            at: HostTime(1_001_000),
        });
        rec
    }

    #[test]
    fn export_produces_valid_json() {
        let rec = transition();
        let mut out = Vec::new();
        export(rec.events(), Timebase::MICROS, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 5);
        assert_eq!(arr[0]["name"], "Wheel");
        assert_eq!(arr[0]["args"]["outcome"], "advance");
        assert_eq!(arr[2]["ph"], "b");
        assert_eq!(arr[4]["ph"], "e");
        assert_eq!(arr[2]["id"], arr[4]["id"]);
    }

    #[test]
    fn untimed_events_take_the_previous_timestamp() {
        let rec = transition();
        let mut out = Vec::new();
        export(rec.events(), Timebase::MICROS, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let lock = &parsed[3];
        assert_eq!(lock["name"], "ScrollLock");
        assert_eq!(lock["ts"].as_f64(), Some(1_000.0));
        assert_eq!(parsed[4]["ts"].as_f64(), Some(1_001_000.0));
    }

    #[test]
    fn empty_log_exports_empty_array() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(0));
    }
}
