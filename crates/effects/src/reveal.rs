use foundation::bounds::Insets;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Negative bottom margin: reveal a little after the element clears the fold.
    pub root_margin: Insets,
    pub offset_px: f64,
    pub duration_s: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Insets::bottom_only(-50.0),
            offset_px: 30.0,
            duration_s: 0.6,
        }
    }
}

/// Inline style values for one reveal state.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: String,
    pub transition: Option<String>,
}

impl RevealConfig {
    pub fn hidden_style(&self) -> RevealStyle {
        RevealStyle {
            opacity: "0",
            transform: format!("translateY({}px)", self.offset_px),
            transition: Some(format!(
                "opacity {d}s ease-out, transform {d}s ease-out",
                d = self.duration_s
            )),
        }
    }

    pub fn shown_style(&self) -> RevealStyle {
        RevealStyle {
            opacity: "1",
            transform: "translateY(0)".to_string(),
            transition: None,
        }
    }
}

/// One-shot reveal bookkeeping, indexed in registration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> usize {
        self.revealed.push(false);
        self.revealed.len() - 1
    }

    /// Returns `true` exactly once per element: the first time it intersects.
    /// The host then shows it and stops observing it.
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(done) if intersecting && !*done => {
                *done = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn remaining(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealConfig, RevealTracker};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_styles() {
        let cfg = RevealConfig::default();
        let hidden = cfg.hidden_style();
        assert_eq!(hidden.opacity, "0");
        assert_eq!(hidden.transform, "translateY(30px)");
        assert_eq!(
            hidden.transition.as_deref(),
            Some("opacity 0.6s ease-out, transform 0.6s ease-out")
        );
        assert_eq!(cfg.shown_style().transform, "translateY(0)");
        assert_eq!(cfg.root_margin.to_css(), "0px 0px -50px 0px");
    }

    #[test]
    fn reveals_once() {
        let mut t = RevealTracker::new();
        let a = t.register();
        let b = t.register();
        assert!(!t.on_intersect(a, false));
        assert!(t.on_intersect(a, true));
        assert!(!t.on_intersect(a, true));
        assert!(t.is_revealed(a));
        assert!(!t.is_revealed(b));
        assert_eq!(t.remaining(), 1);
        assert!(!t.on_intersect(99, true));
    }
}
