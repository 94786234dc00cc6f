use glam::Vec2;

use crate::constants::{
    BLOB_BASE_POSITIONS, IDLE_EASING, MIN_INSTANCE_INTERVAL_MS, PARALLAX_DEPTH, PARALLAX_EASING,
    TIME_SCALE,
};
use crate::settings::{InstanceSettings, PointerMode};

/// One accepted animation step: the three blob positions to upload plus the
/// shader time value they were computed at.
#[derive(Clone, Copy, Debug)]
pub struct BlobFrame {
    pub positions: [Vec2; 3],
    pub time_sec: f32,
}

/// Per-instance blob easing state.
///
/// Each instance self-throttles to ~30 fps independently of the global
/// driver's tick rate, and carries a random phase offset so neighboring
/// instances do not pulse in lockstep.
pub struct BlobAnimator {
    blobs: [Vec2; 3],
    idle_targets: [Vec2; 3],
    pointer_target: Vec2,
    hovering: bool,
    hover_enabled: bool,
    pointer_mode: PointerMode,
    sensitivity: [f32; 3],
    phase_offset_ms: f64,
    last_accepted_ms: f64,
}

impl BlobAnimator {
    pub fn new(settings: &InstanceSettings, phase_offset_ms: f64) -> Self {
        let base = BLOB_BASE_POSITIONS.map(|p| Vec2::new(p[0], p[1]));
        Self {
            blobs: base,
            idle_targets: base,
            pointer_target: Vec2::splat(0.5),
            hovering: false,
            hover_enabled: settings.hover_enabled,
            pointer_mode: settings.pointer_mode,
            sensitivity: settings.sensitivity,
            phase_offset_ms,
            last_accepted_ms: f64::NEG_INFINITY,
        }
    }

    /// Latest pointer position in container-normalized coordinates (y up).
    pub fn set_pointer(&mut self, uv: Vec2) {
        self.pointer_target = uv;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
        if !hovering {
            self.pointer_target = Vec2::splat(0.5);
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Advance the animation if enough time has elapsed since the last
    /// accepted step. Returns `None` when throttled.
    pub fn step(&mut self, now_ms: f64) -> Option<BlobFrame> {
        if now_ms - self.last_accepted_ms < MIN_INSTANCE_INTERVAL_MS {
            return None;
        }
        let time_sec = (now_ms + self.phase_offset_ms) * TIME_SCALE;

        if self.hover_enabled && self.hovering {
            match self.pointer_mode {
                PointerMode::Follow => self.ease_toward_pointer(),
                PointerMode::Parallax => {
                    self.advance_idle_targets(time_sec);
                    self.ease_with_parallax();
                }
            }
        } else {
            self.advance_idle_targets(time_sec);
            for i in 0..3 {
                self.blobs[i] = self.blobs[i].lerp(self.idle_targets[i], IDLE_EASING[i]);
            }
        }

        self.last_accepted_ms = now_ms;
        Some(BlobFrame {
            positions: self.blobs,
            time_sec: time_sec as f32,
        })
    }

    /// Ambient drift baseline: three frequency bands, two sinusoid terms per
    /// axis, around the fixed base positions.
    fn advance_idle_targets(&mut self, time_sec: f64) {
        let slow = time_sec * 0.4;
        let medium = time_sec * 0.6;
        let fast = time_sec * 0.8;

        self.idle_targets[0] = Vec2::new(
            (0.3 + (slow * 0.7).sin() * 0.15 + (fast * 0.3).cos() * 0.08) as f32,
            (0.7 + (slow * 0.9).cos() * 0.12 + (medium * 0.5).sin() * 0.06) as f32,
        );
        self.idle_targets[1] = Vec2::new(
            (0.6 + (medium * 0.8).cos() * 0.18 + (slow * 0.4).sin() * 0.07) as f32,
            (0.1 + (medium * 0.6).sin() * 0.14 + (fast * 0.7).cos() * 0.05) as f32,
        );
        self.idle_targets[2] = Vec2::new(
            (0.9 + (fast * 0.5).sin() * 0.16 + (slow * 0.8).cos() * 0.09) as f32,
            (0.5 + (fast * 0.4).cos() * 0.13 + (slow * 0.6).sin() * 0.07) as f32,
        );
    }

    /// Variant A: blob 1 follows the pointer, blobs 2 and 3 follow mirrored
    /// positions, each at its own sensitivity.
    fn ease_toward_pointer(&mut self) {
        let m = self.pointer_target;
        let targets = [
            m,
            Vec2::new(1.0 - m.x, 1.0 - m.y),
            Vec2::new(m.x, 1.0 - m.y),
        ];
        for i in 0..3 {
            self.blobs[i] = self.blobs[i].lerp(targets[i], self.sensitivity[i]);
        }
    }

    /// Variant B: per-blob offsets scaled by pointer deviation from center,
    /// alternating sign to fake depth layering, eased faster than idle drift.
    fn ease_with_parallax(&mut self) {
        let deviation = self.pointer_target - Vec2::splat(0.5);
        for i in 0..3 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let target = self.idle_targets[i] + deviation * PARALLAX_DEPTH[i] * sign;
            self.blobs[i] = self.blobs[i].lerp(target, PARALLAX_EASING);
        }
    }
}
