// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser environment reader for the eligibility gate.

use alloc::string::String;

use pagescroll_core::gate::{DeviceClass, EnvironmentSnapshot};
use web_sys::Window;

/// The parts of `navigator` that do not change while a page is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    user_agent: String,
    max_touch_points: u32,
}

impl Environment {
    /// Reads `navigator.userAgent` and `navigator.maxTouchPoints`.
    ///
    /// Missing values read as an empty user agent and zero touch points,
    /// which classify as desktop.
    #[must_use]
    pub fn read(window: &Window) -> Self {
        let navigator = window.navigator();
        Self {
            user_agent: navigator.user_agent().unwrap_or_default(),
            max_touch_points: u32::try_from(navigator.max_touch_points()).unwrap_or(0),
        }
    }

    /// An environment with fixed navigator values.
    #[must_use]
    pub fn new(user_agent: impl Into<String>, max_touch_points: u32) -> Self {
        Self {
            user_agent: user_agent.into(),
            max_touch_points,
        }
    }

    /// The user agent string.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Device class implied by the navigator fields.
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::classify(&self.user_agent, self.max_touch_points)
    }

    /// Snapshot for the gate at the given viewport width.
    #[must_use]
    pub fn snapshot(&self, viewport_width: f64) -> EnvironmentSnapshot<'_> {
        EnvironmentSnapshot {
            user_agent: &self.user_agent,
            max_touch_points: self.max_touch_points,
            viewport_width,
        }
    }

    /// Snapshot for the gate at the window's current `innerWidth`.
    #[must_use]
    pub fn snapshot_of(&self, window: &Window) -> EnvironmentSnapshot<'_> {
        self.snapshot(viewport_width(window))
    }
}

/// `window.innerWidth`, or `0.0` when unavailable.
#[must_use]
pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}
