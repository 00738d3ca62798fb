/// Elapsed-time tracker for animations paced by `requestAnimationFrame`.
///
/// The origin is the timestamp of the first frame the animation sees, not the
/// moment it was scheduled, so the first step always reports zero elapsed.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AnimationClock {
    origin_ms: Option<f64>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self { origin_ms: None }
    }

    pub fn has_started(&self) -> bool {
        self.origin_ms.is_some()
    }

    /// Milliseconds since the first observed frame. Never negative.
    pub fn elapsed(&mut self, timestamp_ms: f64) -> f64 {
        let origin = *self.origin_ms.get_or_insert(timestamp_ms);
        (timestamp_ms - origin).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationClock;

    #[test]
    fn first_frame_is_origin() {
        let mut clock = AnimationClock::new();
        assert!(!clock.has_started());
        assert_eq!(clock.elapsed(1234.5), 0.0);
        assert!(clock.has_started());
        assert_eq!(clock.elapsed(1250.5), 16.0);
    }

    #[test]
    fn stale_timestamps_clamp_to_zero() {
        let mut clock = AnimationClock::new();
        clock.elapsed(100.0);
        assert_eq!(clock.elapsed(90.0), 0.0);
    }
}
