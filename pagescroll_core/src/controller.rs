// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The full-page section scroll controller.
//!
//! [`SectionScrollController`] wires the [gate](crate::gate), the
//! [registry](crate::registry), the [engine](crate::engine) and the
//! [animator](crate::animator) to a platform [`Host`]:
//!
//! ```text
//!   on_resize ──► Gate ──(Enabled)──► lock page, attach listeners, scroll to focus
//!                      └─(Disabled)─► unlock page, detach listeners
//!
//!   on_wheel ───► Engine ──(Advance)──► Animator::animate_to ──► Host::request_frames
//!
//!   on_frame ───► Animator::step ──► Host::scroll_viewport_to (per animation)
//!                                └─► Host::cancel_frames (when idle)
//! ```
//!
//! Listener lifetime is scoped to the pair (child set, eligibility). Whenever
//! either changes, every listener attached so far is removed before the new
//! set is attached, so duplicates never accumulate.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::animator::Animator;
use crate::backend::Host;
use crate::engine::{Direction, Engine, WheelInput, WheelOutcome};
use crate::gate::{EnvironmentSnapshot, Gate, GateConfig, GateTransition};
use crate::registry::SectionRegistry;
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::{
    AnimationFinishEvent, AnimationStartEvent, DirectionEvent, FocusEvent, GateEvent,
    ListenersEvent, TraceSink, Tracer, WheelEvent,
};

/// Length of a section-to-section scroll, in milliseconds.
pub const ANIMATION_MILLIS: u64 = 1000;

/// Extra time the interception window stays open after an animation's
/// nominal end, in milliseconds.
pub const SETTLE_MILLIS: u64 = 500;

/// Configuration for a [`SectionScrollController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Length of each viewport animation.
    pub animation: Duration,
    /// How long past `animation` the interception window stays open.
    pub settle_margin: Duration,
    /// Eligibility policy.
    pub gate: GateConfig,
}

impl ControllerConfig {
    /// Default configuration for the web backend (microsecond ticks).
    #[must_use]
    pub const fn web() -> Self {
        Self::with_timebase(Timebase::MICROS)
    }

    /// The default millisecond timings expressed in `timebase` ticks.
    #[must_use]
    pub const fn with_timebase(timebase: Timebase) -> Self {
        Self {
            animation: Duration::from_millis(ANIMATION_MILLIS, timebase),
            settle_margin: Duration::from_millis(SETTLE_MILLIS, timebase),
            gate: GateConfig::desktop_only(),
        }
    }

    /// Replaces the eligibility policy.
    #[must_use]
    pub const fn gate(mut self, gate: GateConfig) -> Self {
        self.gate = gate;
        self
    }

    /// Length of the interception window opened by each transition.
    #[must_use]
    pub const fn interception_window(&self) -> Duration {
        self.animation.saturating_add(self.settle_margin)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::web()
    }
}

type DirectionCallback = Box<dyn FnMut(Direction)>;

/// Turns a sequence of sections into full-page scroll targets.
pub struct SectionScrollController<H: Host> {
    host: H,
    config: ControllerConfig,
    gate: Gate,
    registry: SectionRegistry<H::Handle>,
    engine: Engine,
    animator: Animator,
    /// Listeners currently attached on the host, by section ordinal.
    armed: Vec<(usize, H::Handle)>,
    locked: bool,
    on_direction: Option<DirectionCallback>,
    tracer: Tracer,
}

impl<H: Host> core::fmt::Debug for SectionScrollController<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionScrollController")
            .field("config", &self.config)
            .field("enabled", &self.gate.is_eligible())
            .field("sections", &self.registry.len())
            .field("focus", &self.engine.focus())
            .field("armed", &self.armed.len())
            .field("locked", &self.locked)
            .field("animating", &self.animator.is_animating())
            .finish_non_exhaustive()
    }
}

impl<H: Host> SectionScrollController<H> {
    /// Creates a disabled controller with no sections.
    ///
    /// Nothing is locked or subscribed until the first
    /// [`on_resize`](Self::on_resize) finds the environment eligible.
    #[must_use]
    pub fn new(host: H, config: ControllerConfig) -> Self {
        Self {
            host,
            config,
            gate: Gate::new(config.gate),
            registry: SectionRegistry::new(),
            engine: Engine::new(config.interception_window()),
            animator: Animator::new(),
            armed: Vec::new(),
            locked: false,
            on_direction: None,
            tracer: Tracer::none(),
        }
    }

    /// Installs a trace sink.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    /// Registers (or clears) the inner-scroll direction callback.
    pub fn set_direction_callback(&mut self, callback: Option<Box<dyn FnMut(Direction)>>) {
        self.on_direction = callback;
    }

    /// Replaces every section from the current child order.
    ///
    /// `None` children (nothing attachable) keep their ordinal but are never
    /// intercepted.
    pub fn set_children(
        &mut self,
        children: impl IntoIterator<Item = Option<H::Handle>>,
        now: HostTime,
    ) {
        self.registry.rebuild(children);
        self.after_children_changed(now);
    }

    /// Registers the element for child `index`, ref-callback style.
    pub fn attach_section(&mut self, index: usize, handle: H::Handle, now: HostTime) {
        self.registry.attach(index, handle);
        self.after_children_changed(now);
    }

    /// Clears the element for child `index`.
    pub fn detach_section(&mut self, index: usize, now: HostTime) {
        if self.registry.detach(index).is_some() {
            self.after_children_changed(now);
        }
    }

    fn after_children_changed(&mut self, now: HostTime) {
        if let Some((from, to)) = self.engine.clamp_focus(self.registry.len()) {
            self.tracer.focus_changed(&FocusEvent { at: now, from, to });
            if self.gate.is_eligible() {
                self.scroll_to_focus(now);
            }
        }
        self.reconcile_listeners();
    }

    /// Re-evaluates the environment gate. Call once at start-up and on every
    /// viewport resize.
    pub fn on_resize(&mut self, env: &EnvironmentSnapshot<'_>, now: HostTime) {
        let transition = self.gate.evaluate(env);
        if transition == GateTransition::Unchanged {
            return;
        }
        self.tracer.gate_changed(&GateEvent {
            at: now,
            eligible: self.gate.is_eligible(),
            device: env.device_class(),
            viewport_width: env.viewport_width,
        });
        match transition {
            GateTransition::Enabled => {
                self.set_lock(true);
                self.reconcile_listeners();
                self.scroll_to_focus(now);
            }
            GateTransition::Disabled => {
                self.set_lock(false);
                self.reconcile_listeners();
            }
            GateTransition::Unchanged => {}
        }
    }

    /// Handles a wheel event delivered to section `index`.
    ///
    /// The caller must cancel the native event when the outcome
    /// [prevents default](WheelOutcome::prevents_default).
    pub fn on_wheel(&mut self, index: usize, input: WheelInput, now: HostTime) -> WheelOutcome {
        let outcome = if self.gate.is_eligible() && self.registry.get(index).is_some() {
            self.engine.on_wheel(index, self.registry.len(), &input, now)
        } else {
            WheelOutcome::PassThrough
        };
        self.tracer.wheel(&WheelEvent {
            at: now,
            section: index,
            delta_y: input.delta.y,
            outcome,
        });
        if let WheelOutcome::Advance { from, to } = outcome {
            self.tracer.focus_changed(&FocusEvent { at: now, from, to });
            self.scroll_to_focus(now);
        }
        outcome
    }

    /// Handles an inner-scroll event on section `index` at `offset`.
    ///
    /// Returns the direction reported to the callback, or `None` if the
    /// section is not attached.
    pub fn on_inner_scroll(&mut self, index: usize, offset: f64) -> Option<Direction> {
        let section = self.registry.get_mut(index)?;
        let direction = Engine::on_inner_scroll(section, offset);
        self.tracer.direction(&DirectionEvent {
            section: index,
            offset,
            direction,
        });
        if let Some(callback) = &mut self.on_direction {
            callback(direction);
        }
        Some(direction)
    }

    /// Advances every in-flight animation to `now` and writes the viewport.
    ///
    /// Returns `true` if more frames are needed.
    pub fn on_frame(&mut self, now: HostTime) -> bool {
        let host = &mut self.host;
        let tracer = &mut self.tracer;
        let more = self.animator.step(now, |sample| {
            host.scroll_viewport_to(sample.position);
            if sample.finished {
                tracer.animation_finish(&AnimationFinishEvent {
                    id: sample.id,
                    position: sample.position,
                    at: now,
                });
            }
        });
        if !more {
            self.host.cancel_frames();
        }
        more
    }

    /// Releases the page scroll lock and removes every listener.
    ///
    /// The controller stays usable: the next eligible
    /// [`on_resize`](Self::on_resize) engages it again.
    pub fn teardown(&mut self) {
        self.gate.close();
        self.set_lock(false);
        self.reconcile_listeners();
    }

    fn set_lock(&mut self, locked: bool) {
        if self.locked == locked || !self.host.set_scroll_lock(locked) {
            return;
        }
        self.locked = locked;
        self.tracer.scroll_lock(locked);
    }

    /// Detaches every armed listener, then attaches one set per attached
    /// section if the gate is open.
    fn reconcile_listeners(&mut self) {
        let detached = self.armed.len();
        for (index, handle) in self.armed.drain(..) {
            self.host.detach_listeners(index, &handle);
        }
        if self.gate.is_eligible() {
            for section in self.registry.iter_attached() {
                self.host.attach_listeners(section.index(), section.handle());
                self.armed.push((section.index(), section.handle().clone()));
            }
        }
        self.tracer.listeners(&ListenersEvent {
            detached,
            attached: self.armed.len(),
        });
    }

    fn scroll_to_focus(&mut self, now: HostTime) {
        let index = self.engine.focus();
        let Some(top) = self
            .registry
            .handle(index)
            .and_then(|handle| self.host.section_top(handle))
        else {
            return;
        };
        let start = self.host.viewport_scroll_y();
        let animation = self
            .animator
            .animate_to(start, top + start, now, self.config.animation);
        self.tracer.animation_start(&AnimationStartEvent {
            id: animation.id(),
            section: index,
            start,
            target: animation.target(),
            at: now,
            duration: animation.duration(),
        });
        self.host.request_frames();
    }

    /// The focused section ordinal.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.engine.focus()
    }

    /// Whether full-page behavior is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gate.is_eligible()
    }

    /// Whether the page scroll lock is engaged.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether a viewport animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Whether wheel transitions are currently suppressed.
    #[must_use]
    pub fn is_intercepting_suppressed(&self, now: HostTime) -> bool {
        self.engine.window().is_open(now)
    }

    /// Number of child slots, attached or not.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of sections with listeners attached.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The section registry.
    #[must_use]
    pub fn registry(&self) -> &SectionRegistry<H::Handle> {
        &self.registry
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
