// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-page sections demo.
//!
//! Builds four viewport-height sections, one of which has content taller than
//! the viewport, and mounts [`FullPage`] on them. Wheel past the end of a
//! section to move to the next one; the badge in the corner shows the last
//! inner-scroll direction. Controller events are logged to the console.
//!
//! Build with: `wasm-pack build --target web demos/web_sections`
//! Then serve `demos/web_sections/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;

use pagescroll_backend_web::{FullPage, FullPageOptions};
use pagescroll_core::controller::ControllerConfig;
use pagescroll_core::engine::Direction;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

const SECTIONS: [(&str, &str); 4] = [
    ("Intro", "#1d3557"),
    ("Long read", "#457b9d"),
    ("Gallery", "#2a9d8f"),
    ("Contact", "#e76f51"),
];

/// Paragraphs in the tall section; enough to overflow any desktop viewport.
const LONG_PARAGRAPHS: usize = 40;

/// Entry point for the sections demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    style(&body, "margin: 0; font-family: system-ui, sans-serif;")?;

    let container = element(&document, "main")?;
    for (i, (title, color)) in SECTIONS.iter().enumerate() {
        let section_el = section(&document, i, title, color)?;
        container.append_child(&section_el)?;
    }
    body.append_child(&container)?;

    let badge = element(&document, "div")?;
    style(
        &badge,
        "position: fixed; right: 16px; bottom: 16px; padding: 6px 12px; border-radius: 999px; background: rgba(0,0,0,0.6); color: white; font-size: 14px;",
    )?;
    badge.set_text_content(Some("scroll inside a section"));
    body.append_child(&badge)?;

    let page = FullPage::mount(
        container,
        FullPageOptions {
            config: ControllerConfig::web(),
            log_to_console: true,
        },
    )?;
    page.on_direction_change(move |direction| {
        let arrow = match direction {
            Direction::Up => "\u{2191}",
            Direction::Down => "\u{2193}",
        };
        badge.set_text_content(Some(&format!("{arrow} {}", direction.as_str())));
    });

    // The page lives as long as the document.
    core::mem::forget(page);
    Ok(())
}

fn section(
    doc: &Document,
    index: usize,
    title: &str,
    color: &str,
) -> Result<HtmlElement, JsValue> {
    let el = element(doc, "section")?;
    style(
        &el,
        &format!(
            "height: 100vh; overflow-y: auto; box-sizing: border-box; padding: 48px; color: white; background: {color};"
        ),
    )?;

    let heading = element(doc, "h1")?;
    heading.set_text_content(Some(&format!("{} / {title}", index + 1)));
    el.append_child(&heading)?;

    let paragraphs = if index == 1 { LONG_PARAGRAPHS } else { 1 };
    for n in 0..paragraphs {
        let p = element(doc, "p")?;
        p.set_text_content(Some(&format!(
            "Paragraph {}. Keep scrolling; the next section only takes over once this one reaches its edge.",
            n + 1
        )));
        el.append_child(&p)?;
    }
    Ok(el)
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

fn style(el: &web_sys::Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}
