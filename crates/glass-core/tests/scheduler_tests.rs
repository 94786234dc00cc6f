// Host-side tests for the frame-budget scheduler with a simulated clock.

use std::cell::Cell;
use std::rc::Rc;

use glass_core::scheduler::{Clock, FrameScheduler, InstanceId};

#[derive(Clone)]
struct TestClock(Rc<Cell<f64>>);

impl TestClock {
    fn new() -> Self {
        TestClock(Rc::new(Cell::new(0.0)))
    }
    fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

fn scheduler_with_instances(n: u64) -> (FrameScheduler<TestClock>, TestClock, Vec<InstanceId>) {
    let clock = TestClock::new();
    let mut sched = FrameScheduler::new(clock.clone(), 40.0, 33.0);
    let ids: Vec<InstanceId> = (0..n).map(InstanceId).collect();
    for id in &ids {
        sched.set_active(*id, true);
    }
    (sched, clock, ids)
}

#[test]
fn set_active_is_idempotent() {
    let clock = TestClock::new();
    let mut sched = FrameScheduler::new(clock, 40.0, 33.0);
    let id = InstanceId(7);

    assert!(sched.set_active(id, true));
    assert!(!sched.set_active(id, true));
    assert_eq!(sched.active_count(), 1);

    assert!(sched.set_active(id, false));
    assert!(!sched.set_active(id, false));
    assert_eq!(sched.active_count(), 0);
}

#[test]
fn tick_self_throttles_to_thirty_fps() {
    let (mut sched, _clock, _ids) = scheduler_with_instances(2);
    let first = sched.tick(1000.0, |_, _| {});
    assert!(first.accepted);

    let too_soon = sched.tick(1010.0, |_, _| {});
    assert!(!too_soon.accepted);
    assert_eq!(too_soon.updated, 0);

    let later = sched.tick(1033.0, |_, _| {});
    assert!(later.accepted);
    assert_eq!(later.updated, 2);
}

#[test]
fn budget_bounds_work_to_prefix_plus_one_overshoot() {
    // Six instances, each costing a simulated 10ms. Budget is 40ms, so the
    // fifth update overshoots and the sixth must be deferred.
    let (mut sched, clock, _ids) = scheduler_with_instances(6);
    let c = clock.clone();
    let report = sched.tick(0.0, move |_, _| c.advance(10.0));
    assert!(report.accepted);
    assert!(report.budget_exceeded);
    assert_eq!(report.updated, 5);
    assert_eq!(report.deferred, 1);
}

#[test]
fn deferred_instances_are_serviced_on_the_next_tick() {
    let (mut sched, clock, ids) = scheduler_with_instances(6);
    let c = clock.clone();
    sched.tick(0.0, move |_, _| c.advance(10.0));

    // Next accepted tick starts from the instance that got skipped.
    let mut order = Vec::new();
    sched.tick(33.0, |id, _| order.push(id));
    assert_eq!(order.first(), Some(&ids[5]));
    assert_eq!(order.len(), 6);
}

#[test]
fn exceeded_flag_resets_every_accepted_tick() {
    let (mut sched, clock, _ids) = scheduler_with_instances(3);
    let c = clock.clone();
    let first = sched.tick(0.0, move |_, _| c.advance(50.0));
    assert!(first.budget_exceeded);
    assert!(sched.budget_exceeded());

    let second = sched.tick(33.0, |_, _| {});
    assert!(!second.budget_exceeded);
    assert!(!sched.budget_exceeded());
    assert_eq!(second.updated, 3);
}

#[test]
fn update_receives_the_tick_timestamp() {
    let (mut sched, _clock, _ids) = scheduler_with_instances(1);
    let mut seen = 0.0;
    sched.tick(12345.0, |_, now| seen = now);
    assert_eq!(seen, 12345.0);
}

#[test]
fn empty_active_set_ticks_without_work() {
    let clock = TestClock::new();
    let mut sched = FrameScheduler::new(clock, 40.0, 33.0);
    let report = sched.tick(0.0, |_, _| panic!("no instances expected"));
    assert!(report.accepted);
    assert_eq!(report.updated, 0);
    assert_eq!(report.deferred, 0);
}

#[test]
fn deactivation_between_ticks_keeps_the_rotation_sane() {
    // The driver disposes an instance after a tick in which its container
    // turned out to be gone. The rotation cursor may be pointing anywhere
    // by then; removal must not panic or skip the survivors.
    let (mut sched, clock, ids) = scheduler_with_instances(6);
    let c = clock.clone();
    sched.tick(0.0, move |_, _| c.advance(10.0)); // cursor now mid-list

    sched.set_active(ids[5], false);
    sched.set_active(ids[2], false);
    assert_eq!(sched.active_count(), 4);

    let mut seen = Vec::new();
    sched.tick(33.0, |id, _| seen.push(id));
    seen.sort_by_key(|id| id.0);
    assert_eq!(seen, vec![ids[0], ids[1], ids[3], ids[4]]);
}

#[test]
fn deactivated_instance_is_skipped() {
    let (mut sched, _clock, ids) = scheduler_with_instances(3);
    sched.set_active(ids[1], false);
    let mut seen = Vec::new();
    sched.tick(0.0, |id, _| seen.push(id));
    assert_eq!(seen, vec![ids[0], ids[2]]);
}
