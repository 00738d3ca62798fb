use embeds::EmbedSignal;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlIFrameElement, HtmlScriptElement};

use crate::{dom, lazy};

fn report(container: Option<Element>, selector_class: &str, fallback: bool) {
    let Some(container) = container else {
        return;
    };
    if !container.class_list().contains(selector_class) {
        return;
    }
    match lazy::embed_id_of(&container) {
        Some(id) => lazy::signal(id, EmbedSignal::Failed),
        None if fallback => lazy::show_failure(&container),
        None => {}
    }
}

fn on_error(event: Event) {
    let Some(target) = event.target() else {
        return;
    };
    if let Some(frame) = target.dyn_ref::<HtmlIFrameElement>() {
        warn!("failed to load iframe: {}", frame.src());
        report(
            frame.parent_element(),
            lazy::FRAME_SELECTOR.trim_start_matches('.'),
            true,
        );
    } else if let Some(script) = target.dyn_ref::<HtmlScriptElement>() {
        // Widget scripts fail quietly; keep the browser from reporting it too.
        event.prevent_default();
        debug!("widget script failed: {}", script.src());
        report(
            script.parent_element(),
            lazy::WIDGET_SELECTOR.trim_start_matches('.'),
            false,
        );
    }
}

/// Resource errors do not bubble, so the listener runs in the capture phase.
pub(crate) fn install() -> Result<(), JsValue> {
    let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let listener = Closure::<dyn FnMut(Event)>::new(on_error);
    window.add_event_listener_with_callback_and_bool(
        "error",
        listener.as_ref().unchecked_ref(),
        true,
    )?;
    listener.forget();
    Ok(())
}
