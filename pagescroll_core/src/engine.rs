// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel interception and inner-scroll direction tracking.
//!
//! The [`Engine`] only takes over wheel input at the *edges* of a section's
//! own scrollable content. In between, wheel events pass through and the
//! section scrolls natively:
//!
//! ```text
//!   wheel on section i
//!       │
//!       ├─ interception window open ──────────────► Suppressed
//!       │
//!       ├─ delta > 0, at bottom, i not last ──────► Advance { i → focus + 1 }
//!       ├─ delta < 0, at top,    i not first ─────► Advance { i → focus - 1 }
//!       │
//!       └─ otherwise ─────────────────────────────► PassThrough
//! ```
//!
//! Every `Advance` opens an [`InterceptionWindow`] that drops further wheel
//! input until it expires on the host clock.

use kurbo::Vec2;

use crate::registry::Section;
use crate::time::{Duration, HostTime};

/// Direction of a section's inner scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Offset did not increase.
    Up,
    /// Offset increased.
    Down,
}

impl Direction {
    /// Compares two successive offsets.
    ///
    /// An unchanged offset reports [`Up`](Self::Up).
    #[must_use]
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Returns `"up"` or `"down"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Scroll geometry of a section's own content, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current inner scroll offset (`scrollTop`).
    pub scroll_top: f64,
    /// Visible height (`clientHeight`).
    pub client_height: f64,
    /// Total scrollable height (`scrollHeight`).
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// `true` when the content is scrolled to its start.
    ///
    /// Any `scroll_top <= 0` counts, not only an exact zero: negative offsets
    /// reported during elastic overscroll register as the top.
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    /// `true` when the content is scrolled to its end.
    ///
    /// The visible bottom edge is rounded up to absorb sub-pixel drift.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        libm::ceil(self.scroll_top + self.client_height) >= self.scroll_height
    }
}

/// A wheel event as delivered to a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Wheel delta; positive `y` scrolls toward the content end.
    pub delta: Vec2,
    /// The section's scroll geometry when the event arrived.
    pub metrics: ScrollMetrics,
}

impl WheelInput {
    /// Creates a vertical wheel input.
    #[must_use]
    pub fn vertical(delta_y: f64, metrics: ScrollMetrics) -> Self {
        Self {
            delta: Vec2::new(0.0, delta_y),
            metrics,
        }
    }
}

/// What the engine decided for one wheel event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelOutcome {
    /// An interception window is open; the event is dropped without
    /// preventing its default.
    Suppressed,
    /// Not at an edge (or nothing beyond it); native scrolling proceeds.
    PassThrough,
    /// Focus moved by one section; the native event must be cancelled.
    Advance {
        /// Focus before the transition.
        from: usize,
        /// Focus after the transition.
        to: usize,
    },
}

impl WheelOutcome {
    /// Whether the host must call `preventDefault` on the event.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Advance { .. })
    }
}

/// Cooldown during which wheel-triggered transitions are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InterceptionWindow {
    until: Option<HostTime>,
}

impl InterceptionWindow {
    /// Opens (or re-opens) the window until `now + length`.
    pub fn open(&mut self, now: HostTime, length: Duration) {
        self.until = Some(now.saturating_add(length));
    }

    /// Returns `true` while `now` is before the window's end.
    #[must_use]
    pub fn is_open(&self, now: HostTime) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// When the window closes, if it was ever opened.
    #[must_use]
    pub fn closes_at(&self) -> Option<HostTime> {
        self.until
    }

    /// Closes the window immediately.
    pub fn close(&mut self) {
        self.until = None;
    }
}

/// Focus state machine for wheel interception.
#[derive(Clone, Copy, Debug)]
pub struct Engine {
    focus: usize,
    window: InterceptionWindow,
    window_length: Duration,
}

impl Engine {
    /// Creates an engine focused on section 0 whose interception windows last
    /// `window_length`.
    #[must_use]
    pub fn new(window_length: Duration) -> Self {
        Self {
            focus: 0,
            window: InterceptionWindow::default(),
            window_length,
        }
    }

    /// The focused section ordinal.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The current interception window.
    #[must_use]
    pub fn window(&self) -> &InterceptionWindow {
        &self.window
    }

    /// Handles one wheel event on section `index` of `section_count`.
    pub fn on_wheel(
        &mut self,
        index: usize,
        section_count: usize,
        input: &WheelInput,
        now: HostTime,
    ) -> WheelOutcome {
        if self.window.is_open(now) {
            return WheelOutcome::Suppressed;
        }

        let delta_y = input.delta.y;
        let metrics = &input.metrics;
        if delta_y > 0.0 && metrics.is_at_bottom() && index + 1 < section_count {
            self.advance(self.focus.checked_add(1), section_count, now)
        } else if delta_y < 0.0 && metrics.is_at_top() && index > 0 {
            self.advance(self.focus.checked_sub(1), section_count, now)
        } else {
            WheelOutcome::PassThrough
        }
    }

    fn advance(&mut self, to: Option<usize>, section_count: usize, now: HostTime) -> WheelOutcome {
        // Relative to the current focus, not to the section the event hit.
        let Some(to) = to.filter(|&to| to < section_count) else {
            return WheelOutcome::PassThrough;
        };
        let from = core::mem::replace(&mut self.focus, to);
        self.window.open(now, self.window_length);
        WheelOutcome::Advance { from, to }
    }

    /// Pulls focus back into range after the section count shrank.
    ///
    /// Returns the old and new focus if it moved.
    pub fn clamp_focus(&mut self, section_count: usize) -> Option<(usize, usize)> {
        let max = section_count.saturating_sub(1);
        (self.focus > max).then(|| (core::mem::replace(&mut self.focus, max), max))
    }

    /// Records an inner-scroll offset for `section` and returns the direction
    /// relative to the previous offset.
    pub fn on_inner_scroll<H>(section: &mut Section<H>, offset: f64) -> Direction {
        let previous = section.replace_last_offset(offset);
        Direction::between(previous, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SectionRegistry;

    const WINDOW: Duration = Duration(1_500_000);

    fn at_bottom() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 500.0,
            client_height: 300.0,
            scroll_height: 800.0,
        }
    }

    fn mid_content() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 200.0,
            client_height: 300.0,
            scroll_height: 800.0,
        }
    }

    fn at_top() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 0.0,
            client_height: 300.0,
            scroll_height: 800.0,
        }
    }

    #[test]
    fn edges_tolerate_subpixel_drift() {
        let almost = ScrollMetrics {
            scroll_top: 499.4,
            client_height: 300.0,
            scroll_height: 800.0,
        };
        assert!(almost.is_at_bottom(), "799.4 rounds up to 800");
        assert!(!mid_content().is_at_bottom());
        assert!(at_top().is_at_top());
        assert!(!mid_content().is_at_top());
    }

    #[test]
    fn advances_down_from_bottom_edge() {
        let mut engine = Engine::new(WINDOW);
        let outcome = engine.on_wheel(0, 3, &WheelInput::vertical(100.0, at_bottom()), HostTime(0));
        assert_eq!(outcome, WheelOutcome::Advance { from: 0, to: 1 });
        assert!(outcome.prevents_default());
        assert_eq!(engine.focus(), 1);
        assert_eq!(engine.window().closes_at(), Some(HostTime(1_500_000)));
    }

    #[test]
    fn passes_through_inside_content() {
        let mut engine = Engine::new(WINDOW);
        let outcome = engine.on_wheel(0, 3, &WheelInput::vertical(100.0, mid_content()), HostTime(0));
        assert_eq!(outcome, WheelOutcome::PassThrough);
        assert!(!outcome.prevents_default());
        assert_eq!(engine.focus(), 0);
        assert!(!engine.window().is_open(HostTime(0)), "no window opened");
    }

    #[test]
    fn never_advances_past_the_last_section() {
        let mut engine = Engine::new(WINDOW);
        engine.on_wheel(0, 2, &WheelInput::vertical(100.0, at_bottom()), HostTime(0));
        assert_eq!(engine.focus(), 1);

        let later = HostTime(10_000_000);
        let outcome = engine.on_wheel(1, 2, &WheelInput::vertical(100.0, at_bottom()), later);
        assert_eq!(outcome, WheelOutcome::PassThrough);
        assert_eq!(engine.focus(), 1);
    }

    #[test]
    fn elastic_overscroll_counts_as_top() {
        let overscrolled = ScrollMetrics {
            scroll_top: -12.0,
            client_height: 300.0,
            scroll_height: 800.0,
        };
        assert!(overscrolled.is_at_top());

        let mut engine = Engine::new(WINDOW);
        engine.on_wheel(0, 3, &WheelInput::vertical(100.0, at_bottom()), HostTime(0));
        let later = HostTime(10_000_000);
        let outcome = engine.on_wheel(1, 3, &WheelInput::vertical(-40.0, overscrolled), later);
        assert_eq!(outcome, WheelOutcome::Advance { from: 1, to: 0 });
    }

    #[test]
    fn never_retreats_before_the_first_section() {
        let mut engine = Engine::new(WINDOW);
        let outcome = engine.on_wheel(0, 3, &WheelInput::vertical(-100.0, at_top()), HostTime(0));
        assert_eq!(outcome, WheelOutcome::PassThrough);
        assert_eq!(engine.focus(), 0);
    }

    #[test]
    fn retreats_from_top_edge() {
        let mut engine = Engine::new(WINDOW);
        engine.on_wheel(0, 3, &WheelInput::vertical(100.0, at_bottom()), HostTime(0));
        let outcome = engine.on_wheel(
            1,
            3,
            &WheelInput::vertical(-40.0, at_top()),
            HostTime(2_000_000),
        );
        assert_eq!(outcome, WheelOutcome::Advance { from: 1, to: 0 });
    }

    #[test]
    fn window_suppresses_rapid_triggers() {
        let mut engine = Engine::new(WINDOW);
        let input = WheelInput::vertical(100.0, at_bottom());
        engine.on_wheel(0, 5, &input, HostTime(0));
        for t in [1, 500_000, 1_499_999] {
            assert_eq!(
                engine.on_wheel(1, 5, &input, HostTime(t)),
                WheelOutcome::Suppressed,
                "window still open at {t}"
            );
        }
        assert_eq!(engine.focus(), 1, "only the first trigger counts");

        let outcome = engine.on_wheel(1, 5, &input, HostTime(1_500_000));
        assert_eq!(outcome, WheelOutcome::Advance { from: 1, to: 2 });
    }

    #[test]
    fn every_transition_is_a_single_step_in_range() {
        let mut engine = Engine::new(Duration::ZERO);
        let count = 4;
        let script = [1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0];
        for (t, delta) in script.into_iter().enumerate() {
            let metrics = if delta > 0.0 { at_bottom() } else { at_top() };
            let index = engine.focus();
            let before = engine.focus();
            let outcome = engine.on_wheel(
                index,
                count,
                &WheelInput::vertical(delta * 100.0, metrics),
                HostTime(t as u64),
            );
            if let WheelOutcome::Advance { from, to } = outcome {
                assert_eq!(from, before);
                assert_eq!(from.abs_diff(to), 1, "step of exactly one");
            }
            assert!(engine.focus() < count, "focus left range");
        }
        assert_eq!(engine.focus(), 1);
    }

    #[test]
    fn clamp_pulls_focus_back_into_range() {
        let mut engine = Engine::new(Duration::ZERO);
        for t in 0..3 {
            engine.on_wheel(t, 4, &WheelInput::vertical(1.0, at_bottom()), HostTime(t as u64));
        }
        assert_eq!(engine.focus(), 3);
        assert_eq!(engine.clamp_focus(4), None);
        assert_eq!(engine.clamp_focus(2), Some((3, 1)));
        assert_eq!(engine.clamp_focus(0), Some((1, 0)));
    }

    #[test]
    fn inner_scroll_reports_direction_and_records_offset() {
        let mut reg = SectionRegistry::new();
        reg.rebuild([Some(())]);
        let section = reg.get_mut(0).expect("attached");

        assert_eq!(Engine::on_inner_scroll(section, 120.0), Direction::Down);
        assert_eq!(Engine::on_inner_scroll(section, 180.0), Direction::Down);
        assert_eq!(section.last_offset(), 180.0);
        assert_eq!(Engine::on_inner_scroll(section, 60.0), Direction::Up);
    }

    #[test]
    fn unchanged_offset_reports_up() {
        // Equal offsets fall to the "up" branch.
        assert_eq!(Direction::between(180.0, 180.0), Direction::Up);
        assert_eq!(Direction::between(0.0, 0.0).as_str(), "up");
    }
}
