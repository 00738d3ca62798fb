/// Axis-aligned rectangle in CSS pixels, viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// The visible viewport of a window scrolled to the origin.
    pub fn viewport(width: f64, height: f64) -> Self {
        Rect::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Zero width or height; what `display: none` elements report.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grows each edge outward by the matching inset. Negative insets shrink.
    pub fn expand(&self, insets: Insets) -> Self {
        Rect::new(
            self.left - insets.left,
            self.top - insets.top,
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    /// Touching edges count as intersecting, matching the browser's
    /// intersection observer for zero-area overlaps.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }
}

/// Per-edge margin in CSS pixels. Positive values push the edge outward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Insets {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(px: f64) -> Self {
        Insets::new(px, px, px, px)
    }

    /// Only the bottom edge moves; used for "reveal slightly before the fold".
    pub fn bottom_only(px: f64) -> Self {
        Insets::new(0.0, 0.0, px, 0.0)
    }

    /// CSS `rootMargin` form: a single value when uniform, else
    /// `top right bottom left`.
    pub fn to_css(&self) -> String {
        if self.top == self.right && self.right == self.bottom && self.bottom == self.left {
            format!("{}px", self.top)
        } else {
            format!(
                "{}px {}px {}px {}px",
                self.top, self.right, self.bottom, self.left
            )
        }
    }
}
