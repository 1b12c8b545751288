// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased viewport scroll animations.
//!
//! [`Animator`] owns every in-flight [`ScrollAnimation`]. Each frame the
//! backend calls [`Animator::step`] with the frame timestamp; every active
//! animation produces one viewport position, in the order the animations were
//! started, and completed animations are dropped.
//!
//! There is no cancellation. A second animation started before the first
//! finishes runs alongside it, and both write the viewport each frame, so the
//! newest one wins visually until the older one completes.

use alloc::vec::Vec;

use crate::easing::{ease_in_out_sine, progress, round_half_up};
use crate::time::{Duration, HostTime};

/// Identifies one animation started by an [`Animator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub u64);

/// One eased scroll from a start offset to a target offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    id: AnimationId,
    start: f64,
    delta: f64,
    started_at: HostTime,
    duration: Duration,
}

impl ScrollAnimation {
    /// Creates an animation from `start` to `target` beginning at
    /// `started_at`.
    #[must_use]
    pub fn new(
        id: AnimationId,
        start: f64,
        target: f64,
        started_at: HostTime,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            start,
            delta: target - start,
            started_at,
            duration,
        }
    }

    /// Returns this animation's id.
    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Returns the offset the animation started from.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the offset the animation ends at.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.start + self.delta
    }

    /// Returns the configured duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, now: HostTime) -> f64 {
        progress(self.started_at, now, self.duration)
    }

    /// Viewport position at `now`: `round(start + delta · ease(progress))`.
    #[must_use]
    pub fn position_at(&self, now: HostTime) -> i64 {
        let eased = ease_in_out_sine(self.progress_at(now));
        to_pixel(self.start + self.delta * eased)
    }

    /// Returns `true` once progress has reached 1.
    #[must_use]
    pub fn is_finished_at(&self, now: HostTime) -> bool {
        self.progress_at(now) >= 1.0
    }
}

/// One frame's output for one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSample {
    /// Which animation produced the sample.
    pub id: AnimationId,
    /// Viewport position to write.
    pub position: i64,
    /// Whether this was the animation's last frame.
    pub finished: bool,
}

/// Drives every in-flight [`ScrollAnimation`].
#[derive(Debug, Default)]
pub struct Animator {
    active: Vec<ScrollAnimation>,
    next_id: u64,
}

impl Animator {
    /// Creates an animator with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an animation from `start` to `target` and returns a copy of it.
    pub fn animate_to(
        &mut self,
        start: f64,
        target: f64,
        now: HostTime,
        duration: Duration,
    ) -> ScrollAnimation {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let animation = ScrollAnimation::new(id, start, target, now, duration);
        self.active.push(animation);
        animation
    }

    /// Samples every active animation at `now`, in start order, and retires
    /// the ones that reached the end.
    ///
    /// Returns `true` if any animation still needs frames.
    pub fn step(&mut self, now: HostTime, mut emit: impl FnMut(FrameSample)) -> bool {
        self.active.retain(|animation| {
            let finished = animation.is_finished_at(now);
            emit(FrameSample {
                id: animation.id,
                position: animation.position_at(now),
                finished,
            });
            !finished
        });
        !self.active.is_empty()
    }

    /// Returns `true` while at least one animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Returns the in-flight animations in start order.
    #[must_use]
    pub fn active(&self) -> &[ScrollAnimation] {
        &self.active
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "scroll offsets are far inside the i64 range"
)]
fn to_pixel(v: f64) -> i64 {
    round_half_up(v) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration(1_000_000);

    #[test]
    fn endpoints_round_start_and_target() {
        let a = ScrollAnimation::new(AnimationId(0), 10.4, 820.6, HostTime(0), D);
        assert_eq!(a.position_at(HostTime(0)), 10, "progress 0 is round(S)");
        assert_eq!(a.position_at(HostTime(1_000_000)), 821, "progress 1 is round(T)");
        assert_eq!(a.position_at(HostTime(5_000_000)), 821, "clamped past the end");
    }

    #[test]
    fn midpoint_is_halfway() {
        let a = ScrollAnimation::new(AnimationId(0), 0.0, 900.0, HostTime(0), D);
        assert_eq!(a.position_at(HostTime(500_000)), 450);
    }

    #[test]
    fn upward_animation_moves_monotonically() {
        let a = ScrollAnimation::new(AnimationId(0), 1800.0, 900.0, HostTime(0), D);
        let mut prev = a.position_at(HostTime(0));
        for step in 1..=100_u64 {
            let p = a.position_at(HostTime(step * 10_000));
            assert!(p <= prev, "position went back up at step {step}");
            prev = p;
        }
        assert_eq!(prev, 900);
    }

    #[test]
    fn step_retires_finished_animations() {
        let mut animator = Animator::new();
        animator.animate_to(0.0, 100.0, HostTime(0), D);
        assert!(animator.is_animating());

        let mut samples = Vec::new();
        assert!(animator.step(HostTime(500_000), |s| samples.push(s)));
        assert!(!animator.step(HostTime(1_000_000), |s| samples.push(s)));
        assert!(!animator.is_animating());

        assert_eq!(samples.len(), 2);
        assert!(!samples[0].finished);
        assert_eq!(samples[1].position, 100);
        assert!(samples[1].finished);
    }

    #[test]
    fn overlapping_animations_both_run_to_completion() {
        let mut animator = Animator::new();
        let first = animator.animate_to(0.0, 100.0, HostTime(0), D);
        let second = animator.animate_to(50.0, 200.0, HostTime(400_000), D);
        assert_ne!(first.id(), second.id());

        let mut order = Vec::new();
        animator.step(HostTime(600_000), |s| order.push(s.id));
        assert_eq!(order, [first.id(), second.id()], "start order, newest last");

        let mut finished = Vec::new();
        animator.step(HostTime(1_000_000), |s| {
            if s.finished {
                finished.push(s.id);
            }
        });
        assert_eq!(finished, [first.id()]);
        assert_eq!(animator.active().len(), 1);

        assert!(!animator.step(HostTime(1_400_000), |_| {}));
    }

    #[test]
    fn zero_duration_lands_on_target() {
        let mut animator = Animator::new();
        animator.animate_to(0.0, 300.0, HostTime(10), Duration::ZERO);
        let mut last = None;
        let more = animator.step(HostTime(10), |s| last = Some(s));
        assert!(!more);
        let last = last.expect("one sample");
        assert_eq!(last.position, 300);
        assert!(last.finished);
    }
}
