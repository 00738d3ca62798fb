/// Returns the selector for a same-page link, or `None` for links that should
/// keep their default behaviour (bare `#`, other pages).
pub fn same_page_fragment(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

/// Scroll destination that keeps the target clear of the fixed navigation bar.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorScroll {
    pub padding_px: f64,
}

impl Default for AnchorScroll {
    fn default() -> Self {
        Self { padding_px: 20.0 }
    }
}

impl AnchorScroll {
    /// `target_top` is the element's bounding-rect top (viewport relative).
    pub fn destination(&self, target_top: f64, page_offset: f64, navbar_height: f64) -> f64 {
        target_top + page_offset - navbar_height - self.padding_px
    }
}

#[cfg(test)]
mod tests {
    use super::{AnchorScroll, same_page_fragment};

    #[test]
    fn only_named_fragments_are_intercepted() {
        assert_eq!(same_page_fragment("#flights"), Some("#flights"));
        assert_eq!(same_page_fragment("#"), None);
        assert_eq!(same_page_fragment("/about#team"), None);
        assert_eq!(same_page_fragment("https://example.test/"), None);
    }

    #[test]
    fn destination_clears_navbar() {
        let s = AnchorScroll::default();
        assert_eq!(s.destination(300.0, 1200.0, 72.0), 1408.0);
        assert_eq!(s.destination(-50.0, 1000.0, 72.0), 858.0);
    }
}
