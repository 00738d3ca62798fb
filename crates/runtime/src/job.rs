use crate::event_bus::EventBus;

/// A page-lifetime service registered with the [`Scheduler`].
///
/// Every job runs once when the page is ready. Jobs with a period are then
/// re-run on that interval until the page unloads.
///
/// [`Scheduler`]: crate::Scheduler
pub struct Job {
    pub id: &'static str,
    /// Smaller values run earlier.
    pub priority: i32,
    /// `None` for one-shot jobs.
    pub period_ms: Option<u32>,
    pub run: fn(bus: &mut EventBus),
}

impl Job {
    pub fn once(id: &'static str, run: fn(bus: &mut EventBus)) -> Self {
        Self {
            id,
            priority: 0,
            period_ms: None,
            run,
        }
    }

    pub fn every(id: &'static str, period_ms: u32, run: fn(bus: &mut EventBus)) -> Self {
        Self {
            id,
            priority: 0,
            period_ms: Some(period_ms.max(1)),
            run,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.period_ms.is_some()
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("period_ms", &self.period_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Job;
    use crate::event_bus::EventBus;

    fn noop(_bus: &mut EventBus) {}

    #[test]
    fn zero_period_is_clamped() {
        let job = Job::every("tick", 0, noop);
        assert_eq!(job.period_ms, Some(1));
        assert!(job.is_recurring());
        assert!(!Job::once("banner", noop).is_recurring());
    }
}
