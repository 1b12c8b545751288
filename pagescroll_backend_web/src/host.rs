// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM implementation of [`Host`].
//!
//! [`DomHost`] locks page scrolling through the `overflow` style of `<body>`
//! and `<html>`, moves the viewport with `window.scrollTo`, and subscribes a
//! cancelable `wheel` listener plus a passive `scroll` listener on each
//! section element. Listener closures hold a [`Weak`] reference back to the
//! controller, so events arriving after it is dropped are ignored.

use alloc::boxed::Box;
use alloc::rc::Weak;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Vec2;
use pagescroll_core::backend::Host;
use pagescroll_core::controller::SectionScrollController;
use pagescroll_core::engine::{ScrollMetrics, WheelInput};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlElement, WheelEvent, Window};

use crate::raf::RafLoop;

/// The controller type driven by the DOM.
pub type DomController = SectionScrollController<DomHost>;

/// Closures subscribed on one section element.
struct SectionListeners {
    index: usize,
    element: HtmlElement,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    scroll: Closure<dyn FnMut(Event)>,
}

/// Inline `overflow` values in place before the lock engaged.
#[derive(Debug)]
struct SavedOverflow {
    body: String,
    root: String,
}

/// [`Host`] backed by the browser page.
pub struct DomHost {
    window: Window,
    document: Document,
    controller: Weak<RefCell<DomController>>,
    frames: RafLoop,
    listeners: Vec<SectionListeners>,
    saved_overflow: Option<SavedOverflow>,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("frames", &self.frames)
            .field("listeners", &self.listeners.len())
            .field("saved_overflow", &self.saved_overflow)
            .finish_non_exhaustive()
    }
}

impl DomHost {
    /// Creates a host whose events are routed to `controller`.
    ///
    /// The controller usually does not exist yet; build both with
    /// [`Rc::new_cyclic`](alloc::rc::Rc::new_cyclic).
    #[must_use]
    pub fn new(window: Window, document: Document, controller: Weak<RefCell<DomController>>) -> Self {
        let frames = RafLoop::new({
            let controller = controller.clone();
            move |now| {
                if let Some(shared) = controller.upgrade()
                    && let Ok(mut controller) = shared.try_borrow_mut()
                {
                    controller.on_frame(now);
                }
            }
        });
        Self {
            window,
            document,
            controller,
            frames,
            listeners: Vec::new(),
            saved_overflow: None,
        }
    }

    /// Returns `true` while frame callbacks are being delivered.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    fn lock_targets(&self) -> Option<(HtmlElement, HtmlElement)> {
        let body = self.document.body()?;
        let root = self.document.document_element()?.dyn_into::<HtmlElement>().ok()?;
        Some((body, root))
    }

    fn remove(listeners: &SectionListeners) {
        let _ = listeners.element.remove_event_listener_with_callback(
            "wheel",
            listeners.wheel.as_ref().unchecked_ref(),
        );
        let _ = listeners.element.remove_event_listener_with_callback(
            "scroll",
            listeners.scroll.as_ref().unchecked_ref(),
        );
    }
}

fn overflow_of(element: &HtmlElement) -> String {
    element
        .style()
        .get_property_value("overflow")
        .unwrap_or_default()
}

fn set_overflow(element: &HtmlElement, value: &str) {
    let style = element.style();
    if value.is_empty() {
        let _ = style.remove_property("overflow");
    } else {
        let _ = style.set_property("overflow", value);
    }
}

/// Reads the inner scroll geometry of a section element.
#[must_use]
pub fn scroll_metrics(element: &Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: f64::from(element.scroll_top()),
        client_height: f64::from(element.client_height()),
        scroll_height: f64::from(element.scroll_height()),
    }
}

impl Host for DomHost {
    type Handle = HtmlElement;

    fn set_scroll_lock(&mut self, locked: bool) -> bool {
        let Some((body, root)) = self.lock_targets() else {
            return false;
        };
        if locked {
            if self.saved_overflow.is_none() {
                self.saved_overflow = Some(SavedOverflow {
                    body: overflow_of(&body),
                    root: overflow_of(&root),
                });
            }
            set_overflow(&body, "hidden");
            set_overflow(&root, "hidden");
        } else if let Some(saved) = self.saved_overflow.take() {
            set_overflow(&body, &saved.body);
            set_overflow(&root, &saved.root);
        }
        true
    }

    fn viewport_scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_viewport_to(&mut self, y: i64) {
        self.window.scroll_to_with_x_and_y(0.0, y as f64);
    }

    fn section_top(&self, handle: &HtmlElement) -> Option<f64> {
        handle
            .is_connected()
            .then(|| handle.get_bounding_client_rect().top())
    }

    fn attach_listeners(&mut self, index: usize, handle: &HtmlElement) {
        let wheel = {
            let controller = self.controller.clone();
            let element = handle.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                let Some(shared) = controller.upgrade() else {
                    return;
                };
                let Ok(mut controller) = shared.try_borrow_mut() else {
                    return;
                };
                let input = WheelInput {
                    delta: Vec2::new(event.delta_x(), event.delta_y()),
                    metrics: scroll_metrics(&element),
                };
                if controller
                    .on_wheel(index, input, crate::now())
                    .prevents_default()
                {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        let scroll = {
            let controller = self.controller.clone();
            let element = handle.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                if let Some(shared) = controller.upgrade()
                    && let Ok(mut controller) = shared.try_borrow_mut()
                {
                    controller.on_inner_scroll(index, f64::from(element.scroll_top()));
                }
            }) as Box<dyn FnMut(Event)>)
        };

        let cancelable = AddEventListenerOptions::new();
        cancelable.set_passive(false);
        let _ = handle.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &cancelable,
        );
        let passive = AddEventListenerOptions::new();
        passive.set_passive(true);
        let _ = handle.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            scroll.as_ref().unchecked_ref(),
            &passive,
        );

        self.listeners.push(SectionListeners {
            index,
            element: handle.clone(),
            wheel,
            scroll,
        });
    }

    fn detach_listeners(&mut self, index: usize, handle: &HtmlElement) {
        let Some(pos) = self
            .listeners
            .iter()
            .position(|l| l.index == index && l.element == *handle)
        else {
            return;
        };
        let listeners = self.listeners.swap_remove(pos);
        Self::remove(&listeners);
    }

    fn request_frames(&mut self) {
        self.frames.start();
    }

    fn cancel_frames(&mut self) {
        self.frames.stop();
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.frames.stop();
        for listeners in self.listeners.drain(..) {
            Self::remove(&listeners);
        }
        let _ = self.set_scroll_lock(false);
    }
}
