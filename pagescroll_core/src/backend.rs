// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Pagescroll splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Time**: `now() -> HostTime` and `timebase() -> Timebase` free
//!   functions that read the platform's monotonic clock.
//!
//! - **Environment reader**: builds an
//!   [`EnvironmentSnapshot`](crate::gate::EnvironmentSnapshot) from the
//!   platform (user agent, touch points, viewport width) and feeds it to
//!   [`SectionScrollController::on_resize`] at start-up and on every resize.
//!
//! - **Host**: implements the [`Host`] trait: page scroll lock, viewport
//!   positioning, section geometry, listener (un)subscription and frame
//!   requests.
//!
//! - **Event routing**: forwards wheel and inner-scroll events from the
//!   attached listeners to [`SectionScrollController::on_wheel`] and
//!   [`SectionScrollController::on_inner_scroll`], and frame callbacks to
//!   [`SectionScrollController::on_frame`].
//!
//! # Crate boundaries
//!
//! `pagescroll_core` owns the state machine and this contract module. Backend
//! crates depend on `pagescroll_core` and provide platform glue.
//!
//! [`SectionScrollController::on_resize`]: crate::controller::SectionScrollController::on_resize
//! [`SectionScrollController::on_wheel`]: crate::controller::SectionScrollController::on_wheel
//! [`SectionScrollController::on_inner_scroll`]: crate::controller::SectionScrollController::on_inner_scroll
//! [`SectionScrollController::on_frame`]: crate::controller::SectionScrollController::on_frame

/// Page-level side effects the controller needs from its platform.
///
/// DOM-based hosts and test doubles both implement this trait.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_wheel_event(index: usize, e: WheelEvent) {
///     let outcome = controller.on_wheel(index, wheel_input(&e), now());
///     if outcome.prevents_default() {
///         e.prevent_default();
///     }
/// }
///
/// fn on_animation_frame(timestamp: HostTime) {
///     // Writes the viewport through `Host::scroll_viewport_to` and calls
///     // `Host::cancel_frames` once every animation has finished.
///     controller.on_frame(timestamp);
/// }
/// ```
pub trait Host {
    /// Handle to one section's scrollable element.
    ///
    /// Equal handles denote the same element.
    type Handle: Clone + PartialEq;

    /// Suspends (`true`) or restores (`false`) native page scrolling.
    ///
    /// Restoring must put back whatever styling was in place before the lock
    /// was engaged. Returns `false` if the page could not be changed (for
    /// example, a document without a body); the controller then keeps its
    /// previous lock state and retries on the next transition.
    fn set_scroll_lock(&mut self, locked: bool) -> bool;

    /// Current vertical scroll offset of the viewport.
    fn viewport_scroll_y(&self) -> f64;

    /// Moves the viewport to vertical offset `y`.
    fn scroll_viewport_to(&mut self, y: i64);

    /// Top edge of `handle` relative to the viewport, or `None` if the element
    /// is no longer in the document.
    fn section_top(&self, handle: &Self::Handle) -> Option<f64>;

    /// Subscribes the cancelable wheel listener and the passive inner-scroll
    /// listener for section `index`.
    fn attach_listeners(&mut self, index: usize, handle: &Self::Handle);

    /// Removes the listeners previously attached for section `index`.
    fn detach_listeners(&mut self, index: usize, handle: &Self::Handle);

    /// Asks for per-frame callbacks until [`cancel_frames`](Self::cancel_frames).
    fn request_frames(&mut self);

    /// Stops per-frame callbacks.
    fn cancel_frames(&mut self);
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted [`Host`] for controller tests.

    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use super::Host;

    /// One recorded host call.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Call {
        Lock(bool),
        ScrollTo(i64),
        Attach(usize, u32),
        Detach(usize, u32),
        RequestFrames,
        CancelFrames,
    }

    /// A page with sections stacked at fixed document offsets.
    #[derive(Debug, Default)]
    pub(crate) struct MockHost {
        pub(crate) calls: Vec<Call>,
        pub(crate) locked: bool,
        pub(crate) scroll_y: f64,
        /// Document top of each element id.
        pub(crate) tops: BTreeMap<u32, f64>,
        /// Element id → attached listener count.
        pub(crate) listeners: BTreeMap<u32, usize>,
        pub(crate) frames_requested: bool,
        /// Makes `set_scroll_lock` fail, like a page without a body.
        pub(crate) lock_unavailable: bool,
    }

    impl MockHost {
        /// Elements `0..count`, each `height` pixels tall.
        pub(crate) fn stacked(count: u32, height: f64) -> Self {
            Self {
                tops: (0..count).map(|id| (id, f64::from(id) * height)).collect(),
                ..Self::default()
            }
        }

        pub(crate) fn attached_listener_count(&self) -> usize {
            self.listeners.values().sum()
        }

        pub(crate) fn scrolls(&self) -> Vec<i64> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::ScrollTo(y) => Some(*y),
                    _ => None,
                })
                .collect()
        }
    }

    impl Host for MockHost {
        type Handle = u32;

        fn set_scroll_lock(&mut self, locked: bool) -> bool {
            if self.lock_unavailable {
                return false;
            }
            self.locked = locked;
            self.calls.push(Call::Lock(locked));
            true
        }

        fn viewport_scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn scroll_viewport_to(&mut self, y: i64) {
            self.scroll_y = y as f64;
            self.calls.push(Call::ScrollTo(y));
        }

        fn section_top(&self, handle: &u32) -> Option<f64> {
            self.tops.get(handle).map(|top| top - self.scroll_y)
        }

        fn attach_listeners(&mut self, index: usize, handle: &u32) {
            *self.listeners.entry(*handle).or_default() += 1;
            self.calls.push(Call::Attach(index, *handle));
        }

        fn detach_listeners(&mut self, index: usize, handle: &u32) {
            if let Some(n) = self.listeners.get_mut(handle) {
                *n = n.saturating_sub(1);
            }
            self.calls.push(Call::Detach(index, *handle));
        }

        fn request_frames(&mut self) {
            self.frames_requested = true;
            self.calls.push(Call::RequestFrames);
        }

        fn cancel_frames(&mut self) {
            self.frames_requested = false;
            self.calls.push(Call::CancelFrames);
        }
    }
}
