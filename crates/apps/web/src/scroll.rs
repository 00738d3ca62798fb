use effects::{NavbarStyle, RevealStyle, same_page_fragment};
use runtime::EventBus;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

use crate::{dom, with_page};

const NAVBAR_SELECTOR: &str = ".navbar";
const SECTION_SELECTOR: &str = ".section";
const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

pub(crate) fn install(bus: &mut EventBus) {
    install_navbar(bus);
    install_reveal(bus);
    install_anchor_links(bus);
}

fn apply_navbar(navbar: &HtmlElement, style: NavbarStyle) {
    let classes = navbar.class_list();
    let _ = if style.scrolled {
        classes.add_1("navbar-scrolled")
    } else {
        classes.remove_1("navbar-scrolled")
    };
    dom::set_style(navbar, "box-shadow", style.shadow);
    if let Some(offset) = style.offset {
        dom::set_style(navbar, "transform", offset.css_transform());
    }
}

fn install_navbar(bus: &mut EventBus) {
    let (Some(window), Some(navbar)) = (dom::window(), dom::query_html(NAVBAR_SELECTOR)) else {
        return;
    };

    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        // Offset is sampled at event time; the style is applied on the next frame.
        let current = dom::scroll_y();
        if with_page(|page| page.navbar.request_frame()) != Some(true) {
            return;
        }
        let navbar = navbar.clone();
        let on_frame = Closure::once_into_js(move |_timestamp_ms: f64| {
            let width = dom::viewport().map(|v| v.width).unwrap_or(f64::INFINITY);
            if let Some(style) = with_page(|page| page.navbar.update(current, width)) {
                apply_navbar(&navbar, style);
            }
        });
        dom::request_frame(on_frame.unchecked_ref());
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )
        .is_ok()
    {
        on_scroll.forget();
        bus.emit("scroll", "navbar listener installed");
    }
}

fn apply_reveal(el: &HtmlElement, style: &RevealStyle) {
    dom::set_style(el, "opacity", style.opacity);
    dom::set_style(el, "transform", &style.transform);
    if let Some(transition) = &style.transition {
        dom::set_style(el, "transition", transition);
    }
}

fn reveal_index_of(el: &Element) -> Option<usize> {
    el.get_attribute(REVEAL_INDEX_ATTR)?.parse().ok()
}

fn install_reveal(bus: &mut EventBus) {
    let sections: Vec<HtmlElement> = dom::query_all(SECTION_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect();
    if sections.is_empty() {
        return;
    }
    let Some(config) = with_page(|page| page.reveal_config) else {
        return;
    };

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            {
                let target = entry.target();
                let Some(index) = reveal_index_of(&target) else {
                    continue;
                };
                let intersecting = entry.is_intersecting();
                if with_page(|page| page.reveal.on_intersect(index, intersecting)) != Some(true) {
                    continue;
                }
                if let Ok(section) = target.clone().dyn_into::<HtmlElement>() {
                    apply_reveal(&section, &config.shown_style());
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin.to_css());
    let Ok(observer) = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
    else {
        // Without an observer nothing would ever reveal; leave sections visible.
        debug!("intersection observer unavailable; sections shown without reveal");
        return;
    };

    let hidden = config.hidden_style();
    for section in &sections {
        let Some(index) = with_page(|page| page.reveal.register()) else {
            continue;
        };
        let _ = section.set_attribute(REVEAL_INDEX_ATTR, &index.to_string());
        apply_reveal(section, &hidden);
        observer.observe(section);
    }
    callback.forget();
    bus.emit("reveal", format!("{} sections", sections.len()));
}

fn scroll_to_fragment(selector: &str) {
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        return;
    };
    let Ok(Some(target)) = document.query_selector(selector) else {
        return;
    };
    let navbar_height = dom::query_html(NAVBAR_SELECTOR)
        .map(|nav| f64::from(nav.offset_height()))
        .unwrap_or(0.0);
    let top = target.get_bounding_client_rect().top();
    let Some(destination) =
        with_page(|page| page.anchor.destination(top, dom::scroll_y(), navbar_height))
    else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(destination);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn install_anchor_links(bus: &mut EventBus) {
    let anchors = dom::query_all("a[href^=\"#\"]");
    for anchor in &anchors {
        let link = anchor.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(selector) = same_page_fragment(&href) else {
                return;
            };
            event.prevent_default();
            scroll_to_fragment(selector);
        });
        if anchor
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_ok()
        {
            on_click.forget();
        }
    }
    bus.emit("anchors", format!("{} same-page links", anchors.len()));
}
