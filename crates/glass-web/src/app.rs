use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use fnv::FnvHashMap;
use glass_core::{Clock, FrameScheduler, InstanceId, PerfConfig};
use instant::Instant;
use web_sys as web;

use crate::instance::GlassInstance;

/// Wall clock backing the scheduler's budget measurements. Only differences
/// between readings are ever used, so the epoch is arbitrary.
pub struct WebClock {
    epoch: Instant,
}

impl WebClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Clock for WebClock {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// FIFO of containers waiting for initialization, drained one at a time.
pub struct LifecycleState {
    pub queue: VecDeque<web::Element>,
    pub in_flight: bool,
}

/// Shared handles for everything the subsystem owns. Cloning is cheap; all
/// state lives behind Rc since the whole subsystem is single-threaded.
#[derive(Clone)]
pub struct App {
    pub perf: PerfConfig,
    pub scheduler: Rc<RefCell<FrameScheduler<WebClock>>>,
    pub registry: Rc<RefCell<FnvHashMap<u64, Rc<RefCell<GlassInstance>>>>>,
    pub lifecycle: Rc<RefCell<LifecycleState>>,
    next_id: Rc<Cell<u64>>,
    pub built_count: Rc<Cell<usize>>,
}

impl App {
    pub fn new(perf: PerfConfig) -> Self {
        let scheduler = FrameScheduler::new(
            WebClock::new(),
            perf.render_budget_ms,
            perf.min_tick_interval_ms(),
        );
        Self {
            perf,
            scheduler: Rc::new(RefCell::new(scheduler)),
            registry: Rc::new(RefCell::new(FnvHashMap::default())),
            lifecycle: Rc::new(RefCell::new(LifecycleState {
                queue: VecDeque::new(),
                in_flight: false,
            })),
            next_id: Rc::new(Cell::new(0)),
            built_count: Rc::new(Cell::new(0)),
        }
    }

    pub fn allocate_id(&self) -> InstanceId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        InstanceId(id)
    }

    /// Tear down one instance: deactivate, drop listeners and the canvas,
    /// and forget it entirely.
    pub fn dispose_instance(&self, id: InstanceId) {
        self.scheduler.borrow_mut().set_active(id, false);
        if let Some(instance) = self.registry.borrow_mut().remove(&id.0) {
            instance.borrow_mut().dispose();
        }
    }
}
