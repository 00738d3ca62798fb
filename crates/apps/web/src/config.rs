use effects::{AnchorScroll, NavbarConfig, RevealConfig};
use embeds::{DEFAULT_WIDGET_TEMPLATE, TemplateError, TransitionTiming, WidgetUrlTemplate};
use foundation::bounds::Insets;
use foundation::time::{ClockError, SiteClock};
use serde::Deserialize;
use tracing::warn;

/// Element holding optional JSON overrides for [`SiteConfig`].
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Page behaviour knobs. Every field has a default, so the JSON block only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // ── Clock ────────────────────────────────────────────────
    /// IANA zone the header clock is pinned to.
    pub time_zone: String,
    pub clock_interval_ms: u32,

    // ── Simulated counters ───────────────────────────────────
    pub flight_count_interval_ms: u32,
    pub dashboard_interval_ms: u32,
    pub status_interval_ms: u32,
    /// Count-up duration for the daily flight counters.
    pub counter_duration_ms: u32,
    /// Count-up duration for dashboard values.
    pub dashboard_duration_ms: u32,

    // ── Deferred embeds ──────────────────────────────────────
    /// Load embeds this far ahead of the viewport edge.
    pub proximity_margin_px: f64,
    pub settle_delay_ms: u32,
    pub fade_ms: u32,
    /// Must contain `{airport}` and `{type}`.
    pub widget_url_template: String,

    // ── Scroll effects ───────────────────────────────────────
    pub mobile_breakpoint_px: f64,
    pub navbar_hide_offset_px: f64,
    pub anchor_padding_px: f64,
    pub reveal_threshold: f64,
    /// Sections reveal once they are this far above the bottom edge.
    pub reveal_bottom_margin_px: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            time_zone: "Europe/Istanbul".to_string(),
            clock_interval_ms: 1000,
            flight_count_interval_ms: 5 * 60 * 1000,
            dashboard_interval_ms: 60 * 1000,
            status_interval_ms: 10 * 60 * 1000,
            counter_duration_ms: 2000,
            dashboard_duration_ms: 1500,
            proximity_margin_px: 200.0,
            settle_delay_ms: 150,
            fade_ms: 300,
            widget_url_template: DEFAULT_WIDGET_TEMPLATE.to_string(),
            mobile_breakpoint_px: 768.0,
            navbar_hide_offset_px: 100.0,
            anchor_padding_px: 20.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Json(String),
    Template(TemplateError),
    Clock(ClockError),
    OutOfRange(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(msg) => write!(f, "site config is not valid JSON: {msg}"),
            ConfigError::Template(err) => write!(f, "site config: {err}"),
            ConfigError::Clock(err) => write!(f, "site config: {err}"),
            ConfigError::OutOfRange(field) => write!(f, "site config: {field} is out of range"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TemplateError> for ConfigError {
    fn from(err: TemplateError) -> Self {
        ConfigError::Template(err)
    }
}

impl From<ClockError> for ConfigError {
    fn from(err: ClockError) -> Self {
        ConfigError::Clock(err)
    }
}

impl SiteConfig {
    /// Parses and validates a JSON override block.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site_clock()?;
        self.widget_template()?;
        let intervals = [
            ("clock_interval_ms", self.clock_interval_ms),
            ("flight_count_interval_ms", self.flight_count_interval_ms),
            ("dashboard_interval_ms", self.dashboard_interval_ms),
            ("status_interval_ms", self.status_interval_ms),
        ];
        if let Some((field, _)) = intervals.into_iter().find(|&(_, ms)| ms == 0) {
            return Err(ConfigError::OutOfRange(field));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::OutOfRange("reveal_threshold"));
        }
        if self.proximity_margin_px < 0.0 {
            return Err(ConfigError::OutOfRange("proximity_margin_px"));
        }
        Ok(())
    }

    pub fn site_clock(&self) -> Result<SiteClock, ConfigError> {
        Ok(SiteClock::from_zone_name(&self.time_zone)?)
    }

    pub fn widget_template(&self) -> Result<WidgetUrlTemplate, ConfigError> {
        Ok(WidgetUrlTemplate::parse(&self.widget_url_template)?)
    }

    pub fn proximity_margin(&self) -> Insets {
        Insets::uniform(self.proximity_margin_px)
    }

    pub fn transition_timing(&self) -> TransitionTiming {
        TransitionTiming {
            settle_delay_ms: self.settle_delay_ms,
            fade_ms: self.fade_ms,
        }
    }

    pub fn navbar(&self) -> NavbarConfig {
        NavbarConfig {
            mobile_breakpoint_px: self.mobile_breakpoint_px,
            hide_offset_px: self.navbar_hide_offset_px,
        }
    }

    pub fn reveal(&self) -> RevealConfig {
        RevealConfig {
            threshold: self.reveal_threshold,
            root_margin: Insets::bottom_only(-self.reveal_bottom_margin_px),
            ..RevealConfig::default()
        }
    }

    pub fn anchor_scroll(&self) -> AnchorScroll {
        AnchorScroll {
            padding_px: self.anchor_padding_px,
        }
    }
}

/// Reads the override block from the page. A broken block is reported and
/// ignored; the page always starts.
pub fn load() -> SiteConfig {
    let raw = crate::dom::by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; using defaults");
            SiteConfig::default()
        }
    }
}
