// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for pagescroll.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`FullPage`]: mounts a controller on a container element
//! - [`DomHost`]: the [`Host`] implementation (overflow lock, `scrollTo`,
//!   section listeners)
//! - [`RafLoop`]: `requestAnimationFrame` frame source for animations
//! - [`Environment`]: navigator reader for the eligibility gate
//! - [`ConsoleSink`]: trace events to `console.log`
//!
//! JavaScript hosts can call the exported `mountFullPage(container,
//! onDirectionChange)` instead.

#![no_std]

extern crate alloc;

mod console;
mod environment;
mod full_page;
mod host;
mod raf;

pub use console::ConsoleSink;
pub use environment::{Environment, viewport_width};
pub use full_page::{FullPage, FullPageHandle, FullPageOptions, mount_full_page};
pub use host::{DomController, DomHost, scroll_metrics};
pub use pagescroll_core::backend::Host;
pub use raf::RafLoop;

use pagescroll_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    raf::millis_to_host_time(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}
