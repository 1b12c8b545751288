// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for pagescroll
//! diagnostics.
//!
//! This crate provides [`TraceSink`](pagescroll_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory event log, shareable with a
//!   controller through `Rc<RefCell<_>>`.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a
//!   recorded log.

pub mod chrome;
pub mod pretty;
pub mod recorder;
