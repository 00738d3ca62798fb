use console_error_panic_hook::set_once;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use effects::{AnchorScroll, NavbarState, RevealConfig, RevealTracker};
use foundation::time::SiteClock;
use runtime::{EventBus, Job, Scheduler};

pub mod config;
mod dashboard;
mod diagnostics;
mod dom;
mod failures;
mod lazy;
pub mod logging;
mod scroll;

use config::SiteConfig;
use lazy::LazyEmbeds;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Everything the page services share. Lives for the page lifetime.
pub(crate) struct PageState {
    pub config: SiteConfig,
    pub clock: SiteClock,
    pub embeds: LazyEmbeds,
    pub navbar: NavbarState,
    pub reveal: RevealTracker,
    pub reveal_config: RevealConfig,
    pub anchor: AnchorScroll,
    pub rng: StdRng,
}

impl PageState {
    fn new(config: SiteConfig) -> Self {
        let clock = config.site_clock().unwrap_or_else(|err| {
            warn!("{err}; clock falls back to Europe/Istanbul");
            SiteClock::default()
        });
        debug!("clock zone {}", clock.zone());
        let template = config.widget_template().unwrap_or_else(|err| {
            warn!("{err}; using the default widget endpoint");
            embeds::WidgetUrlTemplate::default()
        });
        Self {
            clock,
            embeds: LazyEmbeds::new(
                template,
                config.proximity_margin(),
                config.transition_timing(),
            ),
            navbar: NavbarState::new(config.navbar()),
            reveal: RevealTracker::new(),
            reveal_config: config.reveal(),
            anchor: config.anchor_scroll(),
            rng: StdRng::from_entropy(),
            config,
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

/// Safe TLS access helper that returns `None` on teardown, before init, or
/// when the state is already borrowed further up the stack.
pub(crate) fn with_page<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut PageState) -> R,
{
    PAGE.try_with(|cell| {
        let mut page = cell.try_borrow_mut().ok()?;
        page.as_mut().map(f)
    })
    .ok()
    .flatten()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();

    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(err) = init() {
                web_sys::console::error_1(&err);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }
    init()
}

fn init() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let debug = diagnostics::debug_requested();
    logging::init(debug);

    let config = config::load();
    let mut scheduler = build_scheduler(&config, dom::query(".activity-dashboard").is_some());
    PAGE.with(|cell| *cell.borrow_mut() = Some(PageState::new(config)));

    let mut bus = EventBus::new();
    lazy::install(&mut bus);
    scroll::install(&mut bus);
    failures::install()?;

    scheduler.run_initial(&mut bus);
    for job in scheduler.recurring() {
        dom::set_interval(job.period_ms, move || {
            let mut bus = EventBus::new();
            (job.run)(&mut bus);
            diagnostics::flush(&mut bus);
        })?;
    }

    if debug {
        diagnostics::enable_debug_mode();
    }
    diagnostics::observe_largest_contentful_paint();
    diagnostics::flush(&mut bus);
    info!("status page ready");
    Ok(())
}

/// Page-lifetime services. Each runs once now and, if periodic, forever after.
fn build_scheduler(config: &SiteConfig, has_dashboard: bool) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler.add_job(Job::once("banner", diagnostics::banner).with_priority(-10));
    scheduler.add_job(Job::every(
        "clock",
        config.clock_interval_ms,
        dashboard::update_clock,
    ));
    scheduler.add_job(Job::every(
        "flight-counts",
        config.flight_count_interval_ms,
        dashboard::estimate_flight_counts,
    ));
    scheduler.add_job(Job::every(
        "status",
        config.status_interval_ms,
        dashboard::check_airport_status,
    ));
    if has_dashboard {
        scheduler.add_job(Job::every(
            "dashboard",
            config.dashboard_interval_ms,
            dashboard::update_activity_dashboard,
        ));
    }
    scheduler
}

#[cfg(test)]
mod tests {
    use super::build_scheduler;
    use crate::config::SiteConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn dashboard_job_only_when_present() {
        let cfg = SiteConfig::default();
        let mut without = build_scheduler(&cfg, false);
        let ids: Vec<_> = without.recurring().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["clock", "flight-counts", "status"]);

        let mut with = build_scheduler(&cfg, true);
        let periods: Vec<_> = with
            .recurring()
            .iter()
            .map(|j| (j.id, j.period_ms))
            .collect();
        assert_eq!(
            periods,
            vec![
                ("clock", 1000),
                ("dashboard", 60_000),
                ("flight-counts", 300_000),
                ("status", 600_000),
            ]
        );
        assert_eq!(with.job_count(), 5);
    }
}
