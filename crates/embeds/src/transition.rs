/// Replaces a frame's placeholder when the embed reports an error.
pub const FAILURE_MESSAGE: &str = "Failed to load content. Please refresh the page.";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmbedSignal {
    Loaded,
    Failed,
}

/// Single-shot completion channel: the first signal wins, later ones are
/// dropped.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CompletionLatch {
    signal: Option<EmbedSignal>,
}

impl CompletionLatch {
    pub fn new() -> Self {
        Self { signal: None }
    }

    /// Returns `true` if this was the first signal.
    pub fn fire(&mut self, signal: EmbedSignal) -> bool {
        if self.signal.is_some() {
            return false;
        }
        self.signal = Some(signal);
        true
    }

    pub fn signal(&self) -> Option<EmbedSignal> {
        self.signal
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmbedKind {
    Frame,
    Script,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Grace period after the load signal so embedded content can paint.
    pub settle_delay_ms: u32,
    pub fade_ms: u32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            settle_delay_ms: 150,
            fade_ms: 300,
        }
    }
}

impl TransitionTiming {
    /// CSS `transition` value for the placeholder fade.
    pub fn css_transition(&self) -> String {
        format!("opacity {}s", f64::from(self.fade_ms) / 1000.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitionPhase {
    Waiting,
    Settling,
    Fading,
    Removed,
    Failed,
}

/// What the host does next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitionStep {
    /// Call `settle_elapsed` after this many milliseconds.
    ScheduleSettle(u32),
    /// Start the opacity transition, then call `fade_elapsed` after this many
    /// milliseconds.
    BeginFade(u32),
    RemovePlaceholder,
    /// Swap the placeholder content for [`FAILURE_MESSAGE`].
    ShowFailure,
    Nothing,
}

/// Placeholder lifecycle for one embed.
///
/// If no signal ever arrives the placeholder simply stays in `Waiting`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlaceholderTransition {
    kind: EmbedKind,
    timing: TransitionTiming,
    phase: TransitionPhase,
    latch: CompletionLatch,
}

impl PlaceholderTransition {
    pub fn new(kind: EmbedKind, timing: TransitionTiming) -> Self {
        Self {
            kind,
            timing,
            phase: TransitionPhase::Waiting,
            latch: CompletionLatch::new(),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn on_signal(&mut self, signal: EmbedSignal) -> TransitionStep {
        if !self.latch.fire(signal) {
            return TransitionStep::Nothing;
        }
        match signal {
            EmbedSignal::Loaded => {
                self.phase = TransitionPhase::Settling;
                TransitionStep::ScheduleSettle(self.timing.settle_delay_ms)
            }
            EmbedSignal::Failed => {
                self.phase = TransitionPhase::Failed;
                // Script failures are suppressed; the widget area keeps its placeholder.
                match self.kind {
                    EmbedKind::Frame => TransitionStep::ShowFailure,
                    EmbedKind::Script => TransitionStep::Nothing,
                }
            }
        }
    }

    pub fn settle_elapsed(&mut self) -> TransitionStep {
        if self.phase != TransitionPhase::Settling {
            return TransitionStep::Nothing;
        }
        self.phase = TransitionPhase::Fading;
        TransitionStep::BeginFade(self.timing.fade_ms)
    }

    pub fn fade_elapsed(&mut self) -> TransitionStep {
        if self.phase != TransitionPhase::Fading {
            return TransitionStep::Nothing;
        }
        self.phase = TransitionPhase::Removed;
        TransitionStep::RemovePlaceholder
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CompletionLatch, EmbedKind, EmbedSignal, PlaceholderTransition, TransitionPhase,
        TransitionStep, TransitionTiming,
    };

    #[test]
    fn latch_keeps_first_signal() {
        let mut latch = CompletionLatch::new();
        assert!(latch.fire(EmbedSignal::Loaded));
        assert!(!latch.fire(EmbedSignal::Failed));
        assert_eq!(latch.signal(), Some(EmbedSignal::Loaded));
    }

    #[test]
    fn load_settles_fades_then_removes() {
        let mut t = PlaceholderTransition::new(EmbedKind::Frame, TransitionTiming::default());
        assert_eq!(t.phase(), TransitionPhase::Waiting);
        assert_eq!(t.on_signal(EmbedSignal::Loaded), TransitionStep::ScheduleSettle(150));
        assert_eq!(t.settle_elapsed(), TransitionStep::BeginFade(300));
        assert_eq!(t.fade_elapsed(), TransitionStep::RemovePlaceholder);
        assert_eq!(t.phase(), TransitionPhase::Removed);
        assert_eq!(t.fade_elapsed(), TransitionStep::Nothing);
    }

    #[test]
    fn timers_before_load_do_nothing() {
        let mut t = PlaceholderTransition::new(EmbedKind::Script, TransitionTiming::default());
        assert_eq!(t.settle_elapsed(), TransitionStep::Nothing);
        assert_eq!(t.fade_elapsed(), TransitionStep::Nothing);
        assert_eq!(t.phase(), TransitionPhase::Waiting);
    }

    #[test]
    fn frame_failure_shows_message_script_failure_is_silent() {
        let mut frame = PlaceholderTransition::new(EmbedKind::Frame, TransitionTiming::default());
        assert_eq!(frame.on_signal(EmbedSignal::Failed), TransitionStep::ShowFailure);
        assert_eq!(frame.phase(), TransitionPhase::Failed);

        let mut script =
            PlaceholderTransition::new(EmbedKind::Script, TransitionTiming::default());
        assert_eq!(script.on_signal(EmbedSignal::Failed), TransitionStep::Nothing);
        assert_eq!(script.phase(), TransitionPhase::Failed);
    }

    #[test]
    fn late_failure_after_load_is_ignored() {
        let mut t = PlaceholderTransition::new(EmbedKind::Frame, TransitionTiming::default());
        t.on_signal(EmbedSignal::Loaded);
        assert_eq!(t.on_signal(EmbedSignal::Failed), TransitionStep::Nothing);
        assert_eq!(t.phase(), TransitionPhase::Settling);
    }

    #[test]
    fn repeated_frame_loads_after_removal_do_nothing() {
        let mut t = PlaceholderTransition::new(EmbedKind::Frame, TransitionTiming::default());
        t.on_signal(EmbedSignal::Loaded);
        t.settle_elapsed();
        t.fade_elapsed();
        for _ in 0..3 {
            assert_eq!(t.on_signal(EmbedSignal::Loaded), TransitionStep::Nothing);
        }
        assert_eq!(t.phase(), TransitionPhase::Removed);
    }

    #[test]
    fn css_transition_uses_seconds() {
        assert_eq!(TransitionTiming::default().css_transition(), "opacity 0.3s");
    }
}
