// Host-side tests for per-instance blob animation.

use glam::Vec2;
use glass_core::blobs::BlobAnimator;
use glass_core::constants::BLOB_BASE_POSITIONS;
use glass_core::settings::{InstanceSettings, PointerMode};

fn default_settings() -> InstanceSettings {
    InstanceSettings::from_attributes(|_| None, false)
}

#[test]
fn step_self_throttles_below_thirty_three_ms() {
    let settings = default_settings();
    let mut anim = BlobAnimator::new(&settings, 0.0);
    assert!(anim.step(0.0).is_some());
    assert!(anim.step(10.0).is_none());
    assert!(anim.step(32.0).is_none());
    assert!(anim.step(33.0).is_some());
}

#[test]
fn identical_animators_produce_identical_frames() {
    let settings = default_settings();
    let mut a = BlobAnimator::new(&settings, 100.0);
    let mut b = BlobAnimator::new(&settings, 100.0);
    for step in 0..50 {
        let now = step as f64 * 33.0;
        let fa = a.step(now).expect("accepted");
        let fb = b.step(now).expect("accepted");
        assert_eq!(fa.time_sec, fb.time_sec);
        for i in 0..3 {
            assert_eq!(fa.positions[i], fb.positions[i]);
        }
    }
}

#[test]
fn idle_drift_moves_blobs_but_stays_near_base() {
    let settings = default_settings();
    let mut anim = BlobAnimator::new(&settings, 0.0);
    let first = anim.step(0.0).unwrap();
    let mut last = first;
    for step in 1..300 {
        last = anim.step(step as f64 * 33.0).unwrap_or(last);
    }
    // Drift amplitudes are bounded sums of sinusoids around the bases.
    for i in 0..3 {
        let base = Vec2::new(BLOB_BASE_POSITIONS[i][0], BLOB_BASE_POSITIONS[i][1]);
        let d = last.positions[i] - base;
        assert!(d.x.abs() < 0.4 && d.y.abs() < 0.4, "blob {i} drifted {d:?}");
    }
    assert_ne!(first.positions[0], last.positions[0], "blob 1 never moved");
}

#[test]
fn follow_mode_converges_toward_pointer_and_mirrors() {
    let settings = default_settings();
    assert_eq!(settings.pointer_mode, PointerMode::Follow);
    let mut anim = BlobAnimator::new(&settings, 0.0);
    anim.set_hovering(true);
    anim.set_pointer(Vec2::new(0.8, 0.2));

    let mut last = anim.step(0.0).unwrap();
    for step in 1..400 {
        last = anim.step(step as f64 * 33.0).unwrap_or(last);
    }
    let b1 = last.positions[0];
    let b2 = last.positions[1];
    let b3 = last.positions[2];
    assert!((b1 - Vec2::new(0.8, 0.2)).length() < 0.05, "blob 1 at {b1:?}");
    assert!((b2 - Vec2::new(0.2, 0.8)).length() < 0.05, "blob 2 at {b2:?}");
    assert!((b3 - Vec2::new(0.8, 0.8)).length() < 0.05, "blob 3 at {b3:?}");
}

#[test]
fn leaving_hover_recenters_pointer_and_resumes_drift() {
    let settings = default_settings();
    let mut anim = BlobAnimator::new(&settings, 0.0);
    anim.set_hovering(true);
    anim.set_pointer(Vec2::new(1.0, 1.0));
    for step in 0..100 {
        anim.step(step as f64 * 33.0);
    }
    anim.set_hovering(false);
    assert!(!anim.is_hovering());

    // Back on the idle path the blobs head toward the drift targets near
    // their base positions rather than sticking at the corner.
    let mut last = None;
    for step in 100..600 {
        if let Some(f) = anim.step(step as f64 * 33.0) {
            last = Some(f);
        }
    }
    let b1 = last.unwrap().positions[0];
    assert!((b1 - Vec2::new(1.0, 1.0)).length() > 0.3, "blob 1 stuck at corner: {b1:?}");
}

#[test]
fn hover_is_ignored_when_disabled() {
    let settings = InstanceSettings::from_attributes(
        |name| (name == "data-hover").then(|| "false".to_string()),
        false,
    );
    assert!(!settings.hover_enabled);
    let mut with_hover = BlobAnimator::new(&settings, 0.0);
    let mut without = BlobAnimator::new(&settings, 0.0);
    with_hover.set_hovering(true);
    with_hover.set_pointer(Vec2::new(0.9, 0.9));

    for step in 0..50 {
        let now = step as f64 * 33.0;
        let a = with_hover.step(now);
        let b = without.step(now);
        match (a, b) {
            (Some(fa), Some(fb)) => assert_eq!(fa.positions[0], fb.positions[0]),
            (None, None) => {}
            _ => panic!("throttling diverged"),
        }
    }
}

#[test]
fn parallax_mode_offsets_blobs_by_pointer_deviation() {
    let settings = InstanceSettings::from_attributes(
        |name| (name == "data-pointer-mode").then(|| "parallax".to_string()),
        false,
    );
    assert_eq!(settings.pointer_mode, PointerMode::Parallax);

    let mut centered = BlobAnimator::new(&settings, 0.0);
    let mut offset = BlobAnimator::new(&settings, 0.0);
    centered.set_hovering(true);
    centered.set_pointer(Vec2::new(0.5, 0.5));
    offset.set_hovering(true);
    offset.set_pointer(Vec2::new(1.0, 0.5));

    let mut lc = None;
    let mut lo = None;
    for step in 0..200 {
        let now = step as f64 * 33.0;
        if let Some(f) = centered.step(now) {
            lc = Some(f);
        }
        if let Some(f) = offset.step(now) {
            lo = Some(f);
        }
    }
    let c = lc.unwrap().positions;
    let o = lo.unwrap().positions;
    // Deviation pushes odd and even layers in opposite directions.
    assert!(o[0].x > c[0].x, "layer 1 should shift with the pointer");
    assert!(o[1].x < c[1].x, "layer 2 should shift against the pointer");
    assert!(o[2].x > c[2].x, "layer 3 should shift with the pointer");
}
