use embeds::{
    EmbedId, EmbedKind, EmbedSignal, EmbedSource, FAILURE_MESSAGE, LazyLoader, LoadAction,
    PlaceholderTransition, TransitionStep, TransitionTiming, VisibilityEntry, WidgetUrlTemplate,
};
use foundation::bounds::Insets;
use runtime::EventBus;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Element, HtmlIFrameElement, HtmlMediaElement, HtmlScriptElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::{diagnostics, dom, with_page};

pub(crate) const FRAME_SELECTOR: &str = ".lazy-load-container";
pub(crate) const WIDGET_SELECTOR: &str = ".lazy-load-widget";
const PLACEHOLDER_SELECTOR: &str = ".loading-placeholder";
const EMBED_ID_ATTR: &str = "data-embed-id";
const AUTOPLAY_ATTR: &str = "data-autoplay";

/// Loader state plus the DOM handles it refers to, indexed by [`EmbedId`].
pub(crate) struct LazyEmbeds {
    loader: LazyLoader,
    containers: Vec<Element>,
    transitions: Vec<PlaceholderTransition>,
    timing: TransitionTiming,
}

impl LazyEmbeds {
    pub fn new(template: WidgetUrlTemplate, margin: Insets, timing: TransitionTiming) -> Self {
        Self {
            loader: LazyLoader::new(template, margin),
            containers: Vec::new(),
            transitions: Vec::new(),
            timing,
        }
    }

    fn register(&mut self, container: &Element, source: EmbedSource) -> EmbedId {
        let kind = match source {
            EmbedSource::Widget { .. } => EmbedKind::Script,
            EmbedSource::Frame { .. } | EmbedSource::Missing => EmbedKind::Frame,
        };
        let id = self.loader.register(source);
        let _ = container.set_attribute(EMBED_ID_ATTR, &id.index().to_string());
        self.containers.push(container.clone());
        self.transitions
            .push(PlaceholderTransition::new(kind, self.timing));
        id
    }

    fn container(&self, id: EmbedId) -> Option<Element> {
        self.containers.get(id.index() as usize).cloned()
    }

    fn transition_mut(&mut self, id: EmbedId) -> Option<&mut PlaceholderTransition> {
        self.transitions.get_mut(id.index() as usize)
    }
}

/// Recovers the id stamped on a container at registration.
pub(crate) fn embed_id_of(container: &Element) -> Option<EmbedId> {
    container
        .get_attribute(EMBED_ID_ATTR)?
        .parse()
        .ok()
        .map(EmbedId::from_index)
}

pub(crate) fn install(bus: &mut EventBus) {
    let frames = dom::query_all(FRAME_SELECTOR);
    let widgets = dom::query_all(WIDGET_SELECTOR);
    if frames.is_empty() && widgets.is_empty() {
        return;
    }

    let Some((observed, root_margin)) = with_page(|page| {
        let mut observed = Vec::new();
        for el in &frames {
            let source = EmbedSource::frame(el.get_attribute("data-src"));
            let missing = source.is_missing();
            page.embeds.register(el, source);
            if !missing {
                observed.push(el.clone());
            }
        }
        for el in &widgets {
            let source =
                EmbedSource::widget(el.get_attribute("data-airport"), el.get_attribute("data-type"));
            let missing = source.is_missing();
            page.embeds.register(el, source);
            if !missing {
                observed.push(el.clone());
            }
        }
        (observed, page.embeds.loader.root_margin())
    }) else {
        return;
    };
    bus.emit(
        "embed.register",
        format!(
            "{} frames, {} widgets, {} with a source",
            frames.len(),
            widgets.len(),
            observed.len()
        ),
    );

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            let visibility: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    embed_id_of(&entry.target())
                        .map(|id| VisibilityEntry::new(id, entry.is_intersecting()))
                })
                .collect();

            let mut bus = EventBus::new();
            for action in load_visible(&visibility, &mut bus) {
                if let Some(container) = with_page(|page| page.embeds.container(action.id())).flatten()
                {
                    observer.unobserve(&container);
                    apply(&action, &container);
                }
            }
            diagnostics::flush(&mut bus);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&root_margin);
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in &observed {
                observer.observe(el);
            }
            callback.forget();
        }
        Err(err) => {
            debug!("intersection observer unavailable ({err:?}); scanning on scroll");
            install_scan_fallback(bus);
        }
    }
}

fn load_visible(entries: &[VisibilityEntry], bus: &mut EventBus) -> Vec<LoadAction> {
    with_page(|page| page.embeds.loader.on_visibility(entries, bus)).unwrap_or_default()
}

fn scan_now(bus: &mut EventBus) {
    let Some(viewport) = dom::viewport() else {
        return;
    };
    let actions = with_page(|page| {
        let containers = page.embeds.containers.clone();
        page.embeds.loader.scan(
            viewport,
            |id| containers.get(id.index() as usize).map(dom::element_rect),
            bus,
        )
    })
    .unwrap_or_default();

    for action in actions {
        if let Some(container) = with_page(|page| page.embeds.container(action.id())).flatten() {
            apply(&action, &container);
        }
    }
}

fn install_scan_fallback(bus: &mut EventBus) {
    scan_now(bus);

    let Some(window) = dom::window() else {
        return;
    };
    let on_scroll = Closure::<dyn FnMut()>::new(|| {
        let mut bus = EventBus::new();
        scan_now(&mut bus);
        diagnostics::flush(&mut bus);
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    for event in ["scroll", "resize"] {
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            on_scroll.as_ref().unchecked_ref(),
            &options,
        );
    }
    on_scroll.forget();
}

/// Frames fire `load` again whenever their content navigates; only the first
/// one starts media, and the completion latch drops the rest.
fn on_load_listener(element: &Element, id: EmbedId, autoplay: bool) {
    let mut first = true;
    let on_load = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if autoplay && first {
            try_autoplay(id);
        }
        first = false;
        signal(id, EmbedSignal::Loaded);
    });
    if element
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .is_ok()
    {
        on_load.forget();
    }
}

fn insert_embed(action: &LoadAction, container: &Element) -> Result<(), JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    match action {
        LoadAction::InsertFrame { id, url } => {
            let frame: HtmlIFrameElement = document.create_element("iframe")?.dyn_into()?;
            frame.set_src(url);
            frame.set_width("100%");
            frame.set_height("100%");
            frame.set_frame_border("0");
            frame.set_attribute("loading", "lazy")?;
            frame.set_attribute("importance", "low")?;
            on_load_listener(&frame, *id, container.has_attribute(AUTOPLAY_ATTR));
            container.append_child(&frame)?;
        }
        LoadAction::InsertScript { id, url } => {
            let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
            script.set_src(url);
            script.set_async(true);
            on_load_listener(&script, *id, false);
            container.append_child(&script)?;
        }
    }
    Ok(())
}

fn apply(action: &LoadAction, container: &Element) {
    if let Err(err) = insert_embed(action, container) {
        warn!("could not insert embed for {}: {err:?}", action.url());
    }
}

/// Feeds a load or failure signal into the embed's placeholder transition.
pub(crate) fn signal(id: EmbedId, signal: EmbedSignal) {
    let step = with_page(|page| {
        page.embeds
            .transition_mut(id)
            .map(|t| t.on_signal(signal))
    })
    .flatten()
    .unwrap_or(TransitionStep::Nothing);
    run_step(id, step);
}

fn run_step(id: EmbedId, step: TransitionStep) {
    let Some((container, timing)) =
        with_page(|page| (page.embeds.container(id), page.embeds.timing))
    else {
        return;
    };
    let Some(container) = container else {
        return;
    };
    let placeholder = container
        .query_selector(PLACEHOLDER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match step {
        TransitionStep::ScheduleSettle(ms) => dom::set_timeout(ms, move || {
            let next = with_page(|page| page.embeds.transition_mut(id).map(|t| t.settle_elapsed()))
                .flatten()
                .unwrap_or(TransitionStep::Nothing);
            run_step(id, next);
        }),
        TransitionStep::BeginFade(ms) => {
            if let Some(placeholder) = &placeholder {
                dom::set_style(placeholder, "transition", &timing.css_transition());
                dom::set_style(placeholder, "opacity", "0");
            }
            dom::set_timeout(ms, move || {
                let next =
                    with_page(|page| page.embeds.transition_mut(id).map(|t| t.fade_elapsed()))
                        .flatten()
                        .unwrap_or(TransitionStep::Nothing);
                run_step(id, next);
            });
        }
        TransitionStep::RemovePlaceholder => {
            if let Some(placeholder) = placeholder {
                placeholder.remove();
            }
        }
        TransitionStep::ShowFailure => show_failure(&container),
        TransitionStep::Nothing => {}
    }
}

/// Replaces the container's content with a static "refresh" notice.
pub(crate) fn show_failure(container: &Element) {
    let Some(document) = dom::document() else {
        return;
    };
    let Ok(notice) = document.create_element("div") else {
        return;
    };
    notice.set_class_name("loading-placeholder");
    notice.set_inner_html(&format!("<p style=\"color: #ef4444;\">{FAILURE_MESSAGE}</p>"));
    container.set_inner_html("");
    let _ = container.append_child(&notice);
}

/// Tries to start audio/video inside a loaded frame. Third-party frames are
/// cross-origin, so their document is normally unreachable; that is logged
/// and left alone.
fn try_autoplay(id: EmbedId) {
    let Some(container) = with_page(|page| page.embeds.container(id)).flatten() else {
        return;
    };
    let Some(frame) = container
        .query_selector("iframe")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlIFrameElement>().ok())
    else {
        return;
    };
    let Some(inner) = frame.content_document() else {
        debug!("autoplay skipped for {}: cross-origin frame", frame.src());
        return;
    };
    let Ok(media) = inner.query_selector_all("audio, video") else {
        return;
    };
    for i in 0..media.length() {
        let Some(el) = media.get(i).and_then(|n| n.dyn_into::<HtmlMediaElement>().ok()) else {
            continue;
        };
        if let Err(err) = el.play() {
            debug!("autoplay refused: {err:?}");
        }
    }
}
