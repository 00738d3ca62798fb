pub const SHADOW_AT_TOP: &str = "0 8px 32px rgba(0, 0, 0, 0.1)";
pub const SHADOW_SCROLLED: &str = "0 8px 32px rgba(0, 0, 0, 0.15)";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavbarConfig {
    /// Viewports at or below this width hide the bar while scrolling down.
    pub mobile_breakpoint_px: f64,
    /// Scroll offset the page must pass before the bar can hide.
    pub hide_offset_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768.0,
            hide_offset_px: 100.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavbarOffset {
    Shown,
    Hidden,
}

impl NavbarOffset {
    pub fn css_transform(self) -> &'static str {
        match self {
            NavbarOffset::Shown => "translateY(0)",
            NavbarOffset::Hidden => "translateY(-100%)",
        }
    }
}

/// Style to apply to the navigation bar after one scroll update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavbarStyle {
    /// Toggles the `navbar-scrolled` class.
    pub scrolled: bool,
    pub shadow: &'static str,
    /// `None` leaves the current transform alone.
    pub offset: Option<NavbarOffset>,
}

/// Scroll state shared between the scroll listener and the frame callback.
///
/// Scroll events only request a frame; the style is recomputed at most once
/// per animation frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavbarState {
    config: NavbarConfig,
    last_scroll: f64,
    ticking: bool,
}

impl NavbarState {
    pub fn new(config: NavbarConfig) -> Self {
        Self {
            config,
            last_scroll: 0.0,
            ticking: false,
        }
    }

    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    /// Call on every scroll event. Returns `true` when the caller should
    /// request an animation frame.
    pub fn request_frame(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.config.mobile_breakpoint_px
    }

    pub fn update(&mut self, current: f64, viewport_width: f64) -> NavbarStyle {
        let style = if current <= 0.0 {
            NavbarStyle {
                scrolled: false,
                shadow: SHADOW_AT_TOP,
                offset: Some(NavbarOffset::Shown),
            }
        } else {
            let offset = if !self.is_narrow(viewport_width) {
                None
            } else if current > self.last_scroll && current > self.config.hide_offset_px {
                Some(NavbarOffset::Hidden)
            } else if current < self.last_scroll {
                Some(NavbarOffset::Shown)
            } else {
                None
            };
            NavbarStyle {
                scrolled: true,
                shadow: SHADOW_SCROLLED,
                offset,
            }
        };

        self.last_scroll = current;
        self.ticking = false;
        style
    }
}

impl Default for NavbarState {
    fn default() -> Self {
        Self::new(NavbarConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{NavbarOffset, NavbarState, SHADOW_AT_TOP, SHADOW_SCROLLED};

    const PHONE: f64 = 390.0;
    const DESKTOP: f64 = 1440.0;

    #[test]
    fn one_frame_per_burst_of_scroll_events() {
        let mut nav = NavbarState::default();
        assert!(nav.request_frame());
        assert!(!nav.request_frame());
        assert!(!nav.request_frame());
        nav.update(10.0, DESKTOP);
        assert!(nav.request_frame());
    }

    #[test]
    fn top_of_page_resets() {
        let mut nav = NavbarState::default();
        nav.update(500.0, PHONE);
        let style = nav.update(0.0, PHONE);
        assert!(!style.scrolled);
        assert_eq!(style.shadow, SHADOW_AT_TOP);
        assert_eq!(style.offset, Some(NavbarOffset::Shown));
    }

    #[test]
    fn desktop_never_hides() {
        let mut nav = NavbarState::default();
        let style = nav.update(400.0, DESKTOP);
        assert!(style.scrolled);
        assert_eq!(style.shadow, SHADOW_SCROLLED);
        assert_eq!(style.offset, None);
    }

    #[test]
    fn phone_hides_past_threshold_and_reveals_on_scroll_up() {
        let mut nav = NavbarState::default();
        // Downward but not past the threshold.
        assert_eq!(nav.update(80.0, PHONE).offset, None);
        assert_eq!(nav.update(150.0, PHONE).offset, Some(NavbarOffset::Hidden));
        assert_eq!(nav.update(150.0, PHONE).offset, None);
        assert_eq!(nav.update(149.0, PHONE).offset, Some(NavbarOffset::Shown));
        assert_eq!(nav.last_scroll(), 149.0);
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let nav = NavbarState::default();
        assert!(nav.is_narrow(768.0));
        assert!(!nav.is_narrow(769.0));
    }

    #[test]
    fn transforms() {
        assert_eq!(NavbarOffset::Hidden.css_transform(), "translateY(-100%)");
        assert_eq!(NavbarOffset::Shown.css_transform(), "translateY(0)");
    }
}
