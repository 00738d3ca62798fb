use crate::event_bus::EventBus;
use crate::job::Job;

/// A recurring job as the host should install it.
#[derive(Debug, Copy, Clone)]
pub struct Recurring {
    pub id: &'static str,
    pub period_ms: u32,
    pub run: fn(bus: &mut EventBus),
}

#[derive(Default)]
pub struct Scheduler {
    next_order: u64,
    jobs: Vec<(u64, Job)>,
    started: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            next_order: 0,
            jobs: Vec::new(),
            started: false,
        }
    }

    pub fn add_job(&mut self, job: Job) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.jobs.push((order, job));
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    fn sort(&mut self) {
        // Total ordering: (priority, id, insertion_order).
        self.jobs.sort_by(|(oa, a), (ob, b)| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.id.cmp(b.id))
                .then_with(|| oa.cmp(ob))
        });
    }

    /// Runs every job once. Later calls do nothing, so page-ready can fire
    /// more than once without duplicating work.
    ///
    /// Returns the number of jobs that ran.
    pub fn run_initial(&mut self, bus: &mut EventBus) -> usize {
        if self.started {
            return 0;
        }
        self.started = true;
        self.sort();
        for (_order, job) in &self.jobs {
            bus.emit("job", job.id);
            (job.run)(bus);
        }
        self.jobs.len()
    }

    /// Recurring jobs in run order, ready to be installed as intervals.
    pub fn recurring(&mut self) -> Vec<Recurring> {
        self.sort();
        self.jobs
            .iter()
            .filter_map(|(_order, job)| {
                job.period_ms.map(|period_ms| Recurring {
                    id: job.id,
                    period_ms,
                    run: job.run,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Scheduler;
    use crate::event_bus::EventBus;
    use crate::job::Job;

    fn job_a(bus: &mut EventBus) {
        bus.emit("ran", "a");
    }

    fn job_b(bus: &mut EventBus) {
        bus.emit("ran", "b");
    }

    fn ran(bus: &EventBus) -> Vec<&str> {
        bus.events()
            .iter()
            .filter(|e| e.kind == "ran")
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn runs_jobs_in_stable_id_order() {
        let mut sched = Scheduler::new();
        sched.add_job(Job::once("b", job_b));
        sched.add_job(Job::every("a", 1000, job_a));

        let mut bus = EventBus::new();
        assert_eq!(sched.run_initial(&mut bus), 2);
        assert_eq!(ran(&bus), vec!["a", "b"]);
    }

    #[test]
    fn runs_higher_priority_first() {
        let mut sched = Scheduler::new();
        sched.add_job(Job::once("a", job_a).with_priority(10));
        sched.add_job(Job::once("b", job_b).with_priority(-1));

        let mut bus = EventBus::new();
        sched.run_initial(&mut bus);
        assert_eq!(ran(&bus), vec!["b", "a"]);
    }

    #[test]
    fn initial_run_happens_once() {
        let mut sched = Scheduler::new();
        sched.add_job(Job::once("a", job_a));

        let mut bus = EventBus::new();
        assert_eq!(sched.run_initial(&mut bus), 1);
        assert_eq!(sched.run_initial(&mut bus), 0);
        assert_eq!(ran(&bus), vec!["a"]);
    }

    #[test]
    fn only_periodic_jobs_recur() {
        let mut sched = Scheduler::new();
        sched.add_job(Job::every("clock", 1000, job_a));
        sched.add_job(Job::once("banner", job_b));
        sched.add_job(Job::every("dashboard", 60_000, job_b));

        let recurring = sched.recurring();
        let ids: Vec<_> = recurring.iter().map(|r| (r.id, r.period_ms)).collect();
        assert_eq!(ids, vec![("clock", 1000), ("dashboard", 60_000)]);
    }
}
