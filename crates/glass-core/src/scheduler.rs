//! Global per-frame render budget scheduler.
//!
//! A single recurring driver calls [`FrameScheduler::tick`] once per display
//! refresh. The scheduler time-slices per-frame work across every active
//! instance under a shared wall-clock budget: once cumulative time since
//! frame start exceeds the budget, remaining instances are skipped for this
//! tick and serviced on a later one. Total work per tick stays bounded no
//! matter how many instances are active.

/// Wall-clock source, injected so ticks are testable without a live frame
/// loop. Only differences between readings matter.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Opaque handle identifying one registered instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// What one tick did.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickReport {
    /// False when the tick was dropped by the ~30 fps self-throttle.
    pub accepted: bool,
    pub updated: usize,
    pub deferred: usize,
    pub budget_exceeded: bool,
}

pub struct FrameScheduler<C: Clock> {
    clock: C,
    budget_ms: f64,
    min_interval_ms: f64,
    last_tick_ms: f64,
    active: Vec<InstanceId>,
    cursor: usize,
    budget_exceeded: bool,
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C, budget_ms: f64, min_interval_ms: f64) -> Self {
        Self {
            clock,
            budget_ms,
            min_interval_ms,
            last_tick_ms: f64::NEG_INFINITY,
            active: Vec::new(),
            cursor: 0,
            budget_exceeded: false,
        }
    }

    /// Toggle an instance's membership in the active set. Redundant calls
    /// are no-ops; returns whether membership actually changed.
    pub fn set_active(&mut self, id: InstanceId, active: bool) -> bool {
        let present = self.active.contains(&id);
        if active && !present {
            self.active.push(id);
            true
        } else if !active && present {
            self.active.retain(|x| *x != id);
            if self.cursor >= self.active.len() {
                self.cursor = 0;
            }
            true
        } else {
            false
        }
    }

    pub fn is_active(&self, id: InstanceId) -> bool {
        self.active.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn budget_exceeded(&self) -> bool {
        self.budget_exceeded
    }

    /// Run one global tick at `now_ms` (the host's frame timestamp).
    ///
    /// Ticks closer than the minimum interval to the previous accepted tick
    /// are ignored. On an accepted tick the exceeded flag is reset and
    /// `update` is invoked per instance until the budget runs out. Iteration
    /// starts from a rotating cursor so instances deferred by an exhausted
    /// budget are the first serviced next time.
    pub fn tick<F>(&mut self, now_ms: f64, mut update: F) -> TickReport
    where
        F: FnMut(InstanceId, f64),
    {
        if now_ms - self.last_tick_ms < self.min_interval_ms {
            return TickReport {
                accepted: false,
                deferred: self.active.len(),
                ..TickReport::default()
            };
        }

        let frame_start = self.clock.now_ms();
        self.budget_exceeded = false;
        let n = self.active.len();
        let mut updated = 0usize;
        for k in 0..n {
            let idx = (self.cursor + k) % n;
            update(self.active[idx], now_ms);
            updated += 1;
            if self.clock.now_ms() - frame_start > self.budget_ms {
                self.budget_exceeded = true;
                break;
            }
        }
        if n > 0 {
            self.cursor = (self.cursor + updated) % n;
        }
        self.last_tick_ms = now_ms;
        TickReport {
            accepted: true,
            updated,
            deferred: n - updated,
            budget_exceeded: self.budget_exceeded,
        }
    }
}
