//! Console banner, debug mode, paint timing and event-bus draining.

use runtime::EventBus;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::lazy::{FRAME_SELECTOR, WIDGET_SELECTOR};

const DEBUG_QUERY: &str = "debug=true";
const LCP_ENTRY_TYPE: &str = "largest-contentful-paint";

// Bound directly so construction and `observe` failures surface as `Err`
// instead of uncaught exceptions.
#[wasm_bindgen]
extern "C" {
    type PerformanceObserver;

    #[wasm_bindgen(constructor, catch)]
    fn new(callback: &js_sys::Function) -> Result<PerformanceObserver, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn observe(this: &PerformanceObserver, options: &JsValue) -> Result<(), JsValue>;

    type PerformanceObserverEntryList;

    #[wasm_bindgen(method, js_name = getEntries)]
    fn get_entries(this: &PerformanceObserverEntryList) -> js_sys::Array;
}

pub(crate) fn is_debug_query(search: &str) -> bool {
    search.contains(DEBUG_QUERY)
}

pub(crate) fn debug_requested() -> bool {
    dom::window()
        .and_then(|w| w.location().search().ok())
        .is_some_and(|search| is_debug_query(&search))
}

/// Styled `console.log` lines printed once at start.
const BANNER: [(&str, &str); 4] = [
    (
        "%cIGASTATUS",
        "font-size: 24px; font-weight: bold; color: #e74c3c;",
    ),
    (
        "%cIstanbul Airport Live Status",
        "font-size: 14px; color: #6b7280;",
    ),
    (
        "%cMade with ❤️ for Aviation Enthusiasts",
        "font-size: 12px; color: #f39c12;",
    ),
    (
        "%cGitHub: https://github.com/igastatus/igastatus-ai",
        "font-size: 11px; color: #6b7280;",
    ),
];

pub(crate) fn banner(bus: &mut EventBus) {
    for (text, style) in BANNER {
        web_sys::console::log_2(&JsValue::from_str(text), &JsValue::from_str(style));
    }
    bus.emit("banner", "printed");
}

/// Outlines the page and reports how many lazy embeds it carries.
pub(crate) fn enable_debug_mode() {
    if let Some(body) = dom::document().and_then(|d| d.body()) {
        dom::set_style(&body, "border", "3px solid red");
    }
    debug!("debug mode enabled");
    debug!("lazy containers: {}", dom::query_all(FRAME_SELECTOR).len());
    debug!("lazy widgets: {}", dom::query_all(WIDGET_SELECTOR).len());
}

fn paint_time(entry: &JsValue) -> Option<f64> {
    let read = |key: &str| {
        js_sys::Reflect::get(entry, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|t| *t > 0.0)
    };
    read("renderTime")
        .or_else(|| read("loadTime"))
        .or_else(|| read("startTime"))
}

pub(crate) fn observe_largest_contentful_paint() {
    if !dom::has_global("PerformanceObserver") {
        return;
    }

    let callback = Closure::<dyn FnMut(JsValue)>::new(|list: JsValue| {
        let list: PerformanceObserverEntryList = list.unchecked_into();
        let entries = list.get_entries();
        if let Some(time) = paint_time(&entries.at(-1)) {
            info!("LCP: {time:.0} ms");
        }
    });

    let options = js_sys::Object::new();
    let entry_types = js_sys::Array::of1(&JsValue::from_str(LCP_ENTRY_TYPE));
    let _ = js_sys::Reflect::set(&options, &JsValue::from_str("entryTypes"), &entry_types);

    let observed = PerformanceObserver::new(callback.as_ref().unchecked_ref())
        .and_then(|observer| observer.observe(&options));
    match observed {
        Ok(()) => callback.forget(),
        Err(err) => warn!("largest-contentful-paint not observable: {err:?}"),
    }
}

/// Writes out everything recorded on `bus` since the last drain.
pub(crate) fn flush(bus: &mut EventBus) {
    for event in bus.drain() {
        debug!(seq = event.seq, kind = event.kind, "{}", event.message);
    }
}

#[cfg(test)]
mod tests {
    use super::{BANNER, is_debug_query};

    #[test]
    fn debug_flag_anywhere_in_query() {
        assert!(is_debug_query("?debug=true"));
        assert!(is_debug_query("?lang=tr&debug=true"));
        assert!(!is_debug_query("?debug=false"));
        assert!(!is_debug_query(""));
    }

    #[test]
    fn banner_lines_are_styled() {
        let texts: Vec<&str> = BANNER.iter().map(|(text, _)| *text).collect();
        assert_eq!(
            texts,
            vec![
                "%cIGASTATUS",
                "%cIstanbul Airport Live Status",
                "%cMade with ❤️ for Aviation Enthusiasts",
                "%cGitHub: https://github.com/igastatus/igastatus-ai",
            ]
        );
        assert!(BANNER.iter().all(|(_, style)| style.contains("font-size")));
    }
}
