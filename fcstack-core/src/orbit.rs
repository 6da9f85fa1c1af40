/// Orbit-style camera controls with optional damping
///
/// The eye moves on a sphere around a target point. Input accumulates into
/// a pending delta which [`OrbitControls::update`] drains once per frame:
/// all at once without damping, or a `damping` fraction per frame with it.
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};

use crate::projection::Camera;

/// Keeps the eye away from the poles where `look_at` degenerates
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Settled once the pending rotation drops below this (radians)
const REST_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending motion applied per update, in `[0, 1]`; 0 disables inertia
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitControls {
    /// Orbit around `target`, starting from the eye position `eye`.
    pub fn from_eye(eye: Point3<f32>, target: Point3<f32>, damping: f32) -> Self {
        let offset = eye - target;
        let distance = offset.norm().max(1e-3);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);

        Self {
            target,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            min_distance: 0.5,
            max_distance: 500.0,
            damping: damping.clamp(0.0, 1.0),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    /// Eye position for the current spherical coordinates
    pub fn eye(&self) -> Point3<f32> {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.target + Vector3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Queue a rotation (radians)
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_yaw += delta_yaw;
        self.pending_pitch += delta_pitch;
    }

    /// Turn the eye about the target immediately, bypassing damping
    pub fn spin(&mut self, delta_yaw: f32) {
        self.yaw += delta_yaw;
    }

    /// Move toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, steps: f32) {
        self.distance =
            (self.distance * 0.9f32.powf(steps)).clamp(self.min_distance, self.max_distance);
    }

    /// Whether queued rotation is still being applied
    pub fn is_moving(&self) -> bool {
        self.pending_yaw.abs() > REST_EPSILON || self.pending_pitch.abs() > REST_EPSILON
    }

    /// Advance one frame. Returns `true` if the eye moved.
    pub fn update(&mut self) -> bool {
        if !self.is_moving() {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            return false;
        }

        let fraction = if self.damping > 0.0 { self.damping } else { 1.0 };
        self.yaw += self.pending_yaw * fraction;
        self.pitch = (self.pitch + self.pending_pitch * fraction).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.pending_yaw *= 1.0 - fraction;
        self.pending_pitch *= 1.0 - fraction;
        true
    }

    /// Write eye and target into `camera`
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.target = self.target;
    }
}
