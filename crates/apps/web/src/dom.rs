//! Thin, forgiving wrappers over `web_sys`. Lookups return `None` instead of
//! failing: an element that is not on this page just disables its feature.

use foundation::bounds::Rect;
use foundation::time::HourOfDay;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into().ok()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector)?.dyn_into().ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// One-shot timer; the closure is released by the browser after it runs.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
    let Some(window) = window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms.min(i32::MAX as u32) as i32,
    );
}

/// Page-lifetime interval. Never cleared, so the closure is leaked on purpose.
pub fn set_interval(ms: u32, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::<dyn FnMut()>::new(f);
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        ms.min(i32::MAX as u32) as i32,
    )?;
    callback.forget();
    Ok(())
}

pub fn request_frame(callback: &js_sys::Function) -> bool {
    window()
        .map(|w| w.request_animation_frame(callback).is_ok())
        .unwrap_or(false)
}

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Hour of day in the visitor's own time zone.
pub fn local_hour() -> Option<HourOfDay> {
    HourOfDay::new(js_sys::Date::new_0().get_hours())
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport() -> Option<Rect> {
    let window = window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Rect::viewport(width, height))
}

pub fn element_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn has_global(name: &str) -> bool {
    window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str(name)).unwrap_or(false))
        .unwrap_or(false)
}
