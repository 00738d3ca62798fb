use runtime::AnimationClock;

/// Linear count-up (or count-down) between two integers, paced by animation
/// frames.
///
/// `value = floor(progress * (end - start) + start)` with
/// `progress = min(elapsed / duration, 1)`. The last frame always lands
/// exactly on `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CounterAnimation {
    start: i64,
    end: i64,
    duration_ms: f64,
    clock: AnimationClock,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    /// No further frame should be requested.
    pub done: bool,
}

impl CounterAnimation {
    pub fn new(start: i64, end: i64, duration_ms: f64) -> Self {
        Self {
            start,
            end,
            duration_ms: duration_ms.max(0.0),
            clock: AnimationClock::new(),
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, progress: f64) -> i64 {
        if progress >= 1.0 {
            return self.end;
        }
        let span = (self.end - self.start) as f64;
        (progress * span + self.start as f64).floor() as i64
    }

    /// Advances to the frame at `timestamp_ms` (a `requestAnimationFrame`
    /// timestamp).
    pub fn step(&mut self, timestamp_ms: f64) -> CounterFrame {
        let elapsed = self.clock.elapsed(timestamp_ms);
        let progress = self.progress(elapsed);
        CounterFrame {
            value: self.value_at(progress),
            done: progress >= 1.0,
        }
    }
}

/// Reads a number currently shown on the page; anything non-numeric is 0.
pub fn parse_displayed(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}
