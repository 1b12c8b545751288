// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine for full-page section scrolling.
//!
//! `pagescroll_core` turns a sequence of sibling content blocks into
//! full-viewport sections. Wheel input moves focus to the next or previous
//! section with an eased viewport animation, but only once the current
//! section's own content has been scrolled to its edge; in between, the
//! section scrolls natively. It is `no_std` compatible (with `alloc`) and
//! talks to the page only through the [`Host`](backend::Host) trait.
//!
//! # Architecture
//!
//! ```text
//!   Backend (resize, wheel, scroll, frame callbacks)
//!       │
//!       ▼
//!   SectionScrollController
//!       ├── Gate ─────────► enable / disable, page scroll lock
//!       ├── SectionRegistry ► ordered section handles
//!       ├── Engine ───────► edge detection, focus ±1, interception window
//!       └── Animator ─────► eased viewport positions per frame
//!       │
//!       ▼
//!   Host (scroll lock, scrollTo, listeners, frame requests)
//! ```
//!
//! **[`gate`]**: Device classification and eligibility policy.
//!
//! **[`registry`]**: Slot-per-child section registry, rebuilt from the
//! current child order.
//!
//! **[`engine`]**: Wheel interception at content edges, inner-scroll
//! direction tracking, and the time-based interception window.
//!
//! **[`animator`]** / **[`easing`]**: Sine ease-in-out viewport animation.
//!
//! **[`controller`]**: [`SectionScrollController`](controller::SectionScrollController),
//! which wires everything to a [`Host`](backend::Host).
//!
//! **[`backend`]**: The host contract platform backends implement.
//!
//! **[`time`]**: Monotonic host time and timebase conversion.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! controller instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animator;
pub mod backend;
pub mod controller;
pub mod easing;
pub mod engine;
pub mod gate;
pub mod registry;
pub mod time;
pub mod trace;
