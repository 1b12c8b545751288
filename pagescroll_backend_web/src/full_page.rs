// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting a controller on a container element.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use pagescroll_core::controller::{ControllerConfig, SectionScrollController};
use pagescroll_core::engine::Direction;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, Window};

use crate::console::ConsoleSink;
use crate::environment::Environment;
use crate::host::{DomController, DomHost};

/// Options for [`FullPage::mount`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FullPageOptions {
    /// Controller timings and eligibility policy.
    pub config: ControllerConfig,
    /// Installs a [`ConsoleSink`]. Only has an effect with the `trace`
    /// feature.
    pub log_to_console: bool,
}

/// Full-page section scrolling over the element children of a container.
///
/// Dropping a `FullPage` releases the page scroll lock and removes every
/// listener it installed.
pub struct FullPage {
    window: Window,
    container: HtmlElement,
    environment: Rc<Environment>,
    controller: Rc<RefCell<DomController>>,
    resize: Closure<dyn FnMut(Event)>,
}

impl core::fmt::Debug for FullPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FullPage")
            .field("environment", &self.environment)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl FullPage {
    /// Takes over scrolling for the element children of `container`.
    ///
    /// Evaluates the environment once immediately and again on every window
    /// `resize`.
    ///
    /// # Errors
    ///
    /// Fails when there is no `window` or `document`, or the resize listener
    /// cannot be installed.
    pub fn mount(container: HtmlElement, options: FullPageOptions) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let controller = Rc::new_cyclic(|weak| {
            RefCell::new(SectionScrollController::new(
                DomHost::new(window.clone(), document, weak.clone()),
                options.config,
            ))
        });
        if options.log_to_console {
            controller
                .borrow_mut()
                .set_trace_sink(Box::new(ConsoleSink::new(crate::timebase())));
        }

        let environment = Rc::new(Environment::read(&window));
        let resize = {
            let controller = Rc::downgrade(&controller);
            let environment = Rc::clone(&environment);
            let window = window.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                if let Some(shared) = controller.upgrade()
                    && let Ok(mut controller) = shared.try_borrow_mut()
                {
                    controller.on_resize(&environment.snapshot_of(&window), crate::now());
                }
            }) as Box<dyn FnMut(Event)>)
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        let page = Self {
            window,
            container,
            environment,
            controller,
            resize,
        };
        page.refresh();
        page.controller
            .borrow_mut()
            .on_resize(&page.environment.snapshot_of(&page.window), crate::now());
        Ok(page)
    }

    /// Re-reads the container's children as sections.
    ///
    /// Call after children are added, removed or reordered. Ignored when
    /// called from inside a direction callback.
    pub fn refresh(&self) {
        let sections = section_elements(&self.container);
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.set_children(sections, crate::now());
        }
    }

    /// Reports the direction of every section's inner scroll to `callback`.
    pub fn on_direction_change(&self, callback: impl FnMut(Direction) + 'static) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.set_direction_callback(Some(Box::new(callback)));
        }
    }

    /// Index of the focused section, or `None` while the controller is busy
    /// dispatching an event.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.controller.try_borrow().ok().map(|c| c.focus())
    }

    /// Returns `true` while the environment is eligible.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|c| c.is_enabled())
    }

    /// The container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }
}

impl Drop for FullPage {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.teardown();
        }
    }
}

/// Element children of `container` in document order.
///
/// Children that are not HTML elements (SVG, MathML) keep their ordinal but
/// are not managed.
fn section_elements(container: &HtmlElement) -> Vec<Option<HtmlElement>> {
    let children = container.children();
    (0..children.length())
        .map(|i| {
            children
                .item(i)
                .and_then(|child| child.dyn_into::<HtmlElement>().ok())
        })
        .collect()
}

/// A [`FullPage`] owned by JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct FullPageHandle {
    page: FullPage,
}

#[wasm_bindgen]
impl FullPageHandle {
    /// Re-reads the container's children.
    pub fn refresh(&self) {
        self.page.refresh();
    }

    /// Index of the focused section, `undefined` while an event is being
    /// dispatched.
    #[wasm_bindgen(getter)]
    pub fn focus(&self) -> Option<usize> {
        self.page.focus()
    }

    /// Whether section scrolling is currently active.
    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.page.is_enabled()
    }
}

/// Mounts full-page scrolling on `container` for JavaScript callers.
///
/// `on_direction_change` is called with `"up"` or `"down"` on every inner
/// scroll of a section. Call `free()` on the returned
/// handle to unmount.
///
/// # Errors
///
/// See [`FullPage::mount`].
#[wasm_bindgen(js_name = mountFullPage)]
pub fn mount_full_page(
    container: HtmlElement,
    on_direction_change: Option<js_sys::Function>,
) -> Result<FullPageHandle, JsValue> {
    let page = FullPage::mount(container, FullPageOptions::default())?;
    if let Some(callback) = on_direction_change {
        page.on_direction_change(move |direction| {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(direction.as_str()));
        });
    }
    Ok(FullPageHandle { page })
}
