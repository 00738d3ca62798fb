use std::cell::RefCell;
use std::rc::Rc;

use runtime::EventBus;
use simulation::{
    ActivitySnapshot, AirportStatus, CounterAnimation, FlightCounts, RateTable, RunwayPair,
    parse_displayed,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::{dom, with_page};

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Counts `element` from whatever number it currently shows up to `end`,
/// one step per animation frame.
pub(crate) fn animate_value(element: &Element, end: i64, duration_ms: u32) {
    let start = parse_displayed(&element.text_content().unwrap_or_default());
    let mut animation = CounterAnimation::new(start, end, f64::from(duration_ms));

    let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let element = element.clone();
    let step = Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let frame = animation.step(timestamp_ms);
        element.set_text_content(Some(&frame.value.to_string()));
        if frame.done {
            // Releases the closure and the Rc cycle with it.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            dom::request_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>);

    dom::request_frame(step.as_ref().unchecked_ref());
    *slot.borrow_mut() = Some(step);
}

fn animate_by_id(id: &str, end: u32, duration_ms: u32) {
    if let Some(el) = dom::by_id(id) {
        animate_value(&el, i64::from(end), duration_ms);
    }
}

pub(crate) fn update_clock(_bus: &mut EventBus) {
    let Some(el) = dom::by_id("local-time") else {
        return;
    };
    match with_page(|page| page.clock.format_hms(dom::now_ms())) {
        Some(Ok(text)) => el.set_text_content(Some(&text)),
        Some(Err(err)) => warn!("clock: {err}"),
        None => {}
    }
}

pub(crate) fn estimate_flight_counts(bus: &mut EventBus) {
    let (Some(arrivals), Some(departures)) =
        (dom::by_id("arrivals-count"), dom::by_id("departures-count"))
    else {
        return;
    };
    let Some(hour) = dom::local_hour() else {
        return;
    };
    let Some((counts, duration)) = with_page(|page| {
        (
            FlightCounts::draw(RateTable::DAILY_FLIGHTS, hour, &mut page.rng),
            page.config.counter_duration_ms,
        )
    }) else {
        return;
    };

    animate_value(&arrivals, i64::from(counts.arrivals), duration);
    animate_value(&departures, i64::from(counts.departures), duration);
    bus.emit(
        "flights",
        format!(
            "hour {} arrivals {} departures {}",
            hour.get(),
            counts.arrivals,
            counts.departures
        ),
    );
}

pub(crate) fn check_airport_status(bus: &mut EventBus) {
    let (Some(badge), Some(text), Some(icon)) = (
        dom::query_html(".status-badge"),
        dom::query(".status-text"),
        dom::query(".status-icon"),
    ) else {
        return;
    };
    let Some(hour) = dom::local_hour() else {
        return;
    };

    let status = AirportStatus::for_hour(hour);
    text.set_text_content(Some(status.text()));
    icon.set_text_content(Some(status.icon()));
    dom::set_style(&badge, "background", status.badge_background());
    bus.emit("status", status.text());
}

fn mark_active_runways(pair: RunwayPair) {
    for designator in RunwayPair::ALL_DESIGNATORS {
        let active = pair.is_active(designator);
        for runway in dom::query_all(&format!(".runway[data-runway=\"{designator}\"]")) {
            let _ = runway.class_list().toggle_with_force("active", active);
        }
    }
}

pub(crate) fn update_activity_dashboard(bus: &mut EventBus) {
    let Some(hour) = dom::local_hour() else {
        return;
    };
    let Some((snapshot, duration)) = with_page(|page| {
        (
            ActivitySnapshot::simulate(hour, &mut page.rng),
            page.config.dashboard_duration_ms,
        )
    }) else {
        return;
    };

    animate_by_id("aircraft-in-air", snapshot.aircraft_in_air, duration);
    animate_by_id("hourly-arrivals", snapshot.hourly.arrivals, duration);
    animate_by_id("hourly-departures", snapshot.hourly.departures, duration);
    animate_by_id("wind-speed", snapshot.wind.speed, duration);

    if let Some(arrow) = dom::html_by_id("wind-arrow") {
        dom::set_style(&arrow, "transform", &snapshot.wind.arrow_transform());
    }
    dom::set_text("wind-direction", &snapshot.wind.direction_label());
    mark_active_runways(snapshot.runways());

    dom::set_text("congestion-level", snapshot.congestion.label());
    if let Some(bar) = dom::html_by_id("congestion-bar") {
        dom::set_style(
            &bar,
            "width",
            &format!("{}%", snapshot.congestion.bar_width_percent()),
        );
    }

    bus.emit(
        "dashboard",
        format!(
            "aloft {} wind {}° runways {:?} congestion {}",
            snapshot.aircraft_in_air,
            snapshot.wind.direction_deg,
            snapshot.runways(),
            snapshot.congestion.label()
        ),
    );
}
