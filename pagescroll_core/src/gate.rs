// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment gate: decides whether full-page scrolling is active at all.
//!
//! The gate classifies the device from its user-agent string and touch
//! capability, optionally checks a minimum viewport width, and reports
//! transitions so the controller can engage or release the page scroll lock
//! and arm or disarm section listeners.

/// Coarse device class derived from the user agent and touch capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Phones and anything advertising itself as mobile.
    Mobile,
    /// Tablets, and any device reporting more than one touch point.
    Tablet,
    /// Everything else.
    Desktop,
}

impl DeviceClass {
    /// Classifies a device.
    ///
    /// - `Mobile` if the user agent contains `mobile`.
    /// - `Tablet` if it contains `ipad`, `tablet` or `android`, or if
    ///   `max_touch_points > 1`.
    /// - `Desktop` otherwise.
    ///
    /// Matching is ASCII case-insensitive.
    #[must_use]
    pub fn classify(user_agent: &str, max_touch_points: u32) -> Self {
        if contains_ignore_ascii_case(user_agent, "mobile") {
            return Self::Mobile;
        }
        // `mobile` is ruled out above, so every `android` here is a tablet.
        let tablet_ua = ["ipad", "tablet", "android"]
            .iter()
            .any(|needle| contains_ignore_ascii_case(user_agent, needle));
        if tablet_ua || max_touch_points > 1 {
            return Self::Tablet;
        }
        Self::Desktop
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// A snapshot of the environment signals the gate consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentSnapshot<'a> {
    /// User-agent string.
    pub user_agent: &'a str,
    /// Maximum simultaneous touch points the device reports.
    pub max_touch_points: u32,
    /// Current viewport width in CSS pixels.
    pub viewport_width: f64,
}

impl EnvironmentSnapshot<'_> {
    /// Classifies the device this snapshot describes.
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::classify(self.user_agent, self.max_touch_points)
    }
}

/// Eligibility policy.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GateConfig {
    /// Minimum viewport width in CSS pixels, if any.
    pub min_viewport_width: Option<f64>,
}

impl GateConfig {
    /// Desktop devices at any viewport width.
    #[must_use]
    pub const fn desktop_only() -> Self {
        Self {
            min_viewport_width: None,
        }
    }

    /// Desktop devices whose viewport is at least `width` pixels wide.
    #[must_use]
    pub const fn with_min_width(width: f64) -> Self {
        Self {
            min_viewport_width: Some(width),
        }
    }

    /// Returns whether `env` is eligible under this policy.
    #[must_use]
    pub fn is_eligible(&self, env: &EnvironmentSnapshot<'_>) -> bool {
        if env.device_class() != DeviceClass::Desktop {
            return false;
        }
        match self.min_viewport_width {
            Some(min) => env.viewport_width >= min,
            None => true,
        }
    }
}

/// Result of re-evaluating the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateTransition {
    /// Eligibility did not change.
    Unchanged,
    /// The gate opened: full-page behavior should engage.
    Enabled,
    /// The gate closed: full-page behavior should release.
    Disabled,
}

/// Tracks eligibility across re-evaluations.
///
/// Starts ineligible; the first evaluation that finds the environment
/// eligible reports [`GateTransition::Enabled`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Gate {
    config: GateConfig,
    eligible: bool,
    evaluated: bool,
}

impl Gate {
    /// Creates an ineligible gate with the given policy.
    #[must_use]
    pub const fn new(config: GateConfig) -> Self {
        Self {
            config,
            eligible: false,
            evaluated: false,
        }
    }

    /// Re-evaluates eligibility against `env`.
    pub fn evaluate(&mut self, env: &EnvironmentSnapshot<'_>) -> GateTransition {
        let eligible = self.config.is_eligible(env);
        self.evaluated = true;
        match (self.eligible, eligible) {
            (false, true) => {
                self.eligible = true;
                GateTransition::Enabled
            }
            (true, false) => {
                self.eligible = false;
                GateTransition::Disabled
            }
            _ => GateTransition::Unchanged,
        }
    }

    /// Forces the gate closed, returning whether it was open.
    pub fn close(&mut self) -> bool {
        core::mem::replace(&mut self.eligible, false)
    }

    /// Returns the current eligibility.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Returns `true` once [`evaluate`](Self::evaluate) has run.
    #[must_use]
    pub fn has_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Returns the policy.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const ANDROID_PHONE: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/126.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 14; SM-X710) Chrome/126.0 Safari/537.36";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_5 like Mac OS X) AppleWebKit/605.1.15";

    fn env(user_agent: &str, max_touch_points: u32, viewport_width: f64) -> EnvironmentSnapshot<'_> {
        EnvironmentSnapshot {
            user_agent,
            max_touch_points,
            viewport_width,
        }
    }

    #[test]
    fn classifies_user_agents() {
        assert_eq!(DeviceClass::classify(CHROME_MAC, 0), DeviceClass::Desktop);
        assert_eq!(DeviceClass::classify(IPHONE, 5), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(ANDROID_PHONE, 5), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(ANDROID_TABLET, 0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(IPAD, 0), DeviceClass::Tablet);
    }

    #[test]
    fn touch_points_make_a_tablet() {
        // iPadOS reports a desktop Safari user agent.
        assert_eq!(DeviceClass::classify(CHROME_MAC, 5), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(CHROME_MAC, 1), DeviceClass::Desktop);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(DeviceClass::classify("FOO MOBILE BAR", 0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify("x TaBlEt y", 0), DeviceClass::Tablet);
    }

    #[test]
    fn starts_ineligible_until_evaluated() {
        let mut gate = Gate::new(GateConfig::desktop_only());
        assert!(!gate.is_eligible());
        assert!(!gate.has_evaluated());

        assert_eq!(gate.evaluate(&env(CHROME_MAC, 0, 1200.0)), GateTransition::Enabled);
        assert!(gate.is_eligible());
        assert_eq!(
            gate.evaluate(&env(CHROME_MAC, 0, 300.0)),
            GateTransition::Unchanged,
            "no width floor by default"
        );
    }

    #[test]
    fn mobile_never_enables() {
        let mut gate = Gate::new(GateConfig::desktop_only());
        assert_eq!(gate.evaluate(&env(IPHONE, 5, 1200.0)), GateTransition::Unchanged);
        assert!(!gate.is_eligible());
        assert!(gate.has_evaluated());
    }

    #[test]
    fn width_floor_toggles_on_resize() {
        let mut gate = Gate::new(GateConfig::with_min_width(1024.0));
        assert_eq!(gate.evaluate(&env(CHROME_MAC, 0, 1200.0)), GateTransition::Enabled);
        assert_eq!(gate.evaluate(&env(CHROME_MAC, 0, 800.0)), GateTransition::Disabled);
        assert_eq!(gate.evaluate(&env(CHROME_MAC, 0, 800.0)), GateTransition::Unchanged);
        assert_eq!(gate.evaluate(&env(CHROME_MAC, 0, 1024.0)), GateTransition::Enabled);
    }

    #[test]
    fn close_reports_previous_state() {
        let mut gate = Gate::new(GateConfig::desktop_only());
        assert!(!gate.close());
        gate.evaluate(&env(CHROME_MAC, 0, 1200.0));
        assert!(gate.close());
        assert!(!gate.is_eligible());
    }
}
