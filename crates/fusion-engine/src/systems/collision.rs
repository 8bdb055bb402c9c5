//! Collision state machine: approach, collide, dissolve.
//!
//! The machine owns the two bodies and the animation state. It never touches
//! the particle or trail pools itself; entering `Particles` is reported as a
//! [`SimEvent::Dissolved`] carrying the origin the pools should activate at.

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::{AnimationState, SimEvent};
use crate::components::body::{Body, BodySide};

/// Seconds spent in `Colliding` before the bodies dissolve.
pub const COLLIDE_HOLD: f32 = 1.5;
/// Intensity ramp rate during `Colliding` (reaches 1.0 after half a second).
pub const INTENSITY_RAMP: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct CollisionMachine {
    pub body_a: Body,
    pub body_b: Body,
    state: AnimationState,
    /// One-shot latch; set when the bodies first come within range.
    collided: bool,
    collision_time: f32,
    particles_started_at: Option<f32>,
    intensity: f32,
}

impl CollisionMachine {
    pub fn new() -> Self {
        Self {
            body_a: Body::new(BodySide::A),
            body_b: Body::new(BodySide::B),
            state: AnimationState::Approaching,
            collided: false,
            collision_time: 0.0,
            particles_started_at: None,
            intensity: 0.0,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    /// Scaled time at which the collision latch fired.
    pub fn collision_time(&self) -> Option<f32> {
        self.collided.then_some(self.collision_time)
    }

    pub fn particles_started_at(&self) -> Option<f32> {
        self.particles_started_at
    }

    /// Collision glow in [0, 1]. Zero outside `Colliding` until a collision happens.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Shape morph factor. Tracks intensity.
    pub fn morph(&self) -> f32 {
        self.intensity
    }

    pub fn body_distance(&self) -> f32 {
        self.body_a.position.distance(self.body_b.position)
    }

    /// Midpoint between the two bodies.
    pub fn center(&self) -> Vec3 {
        (self.body_a.position + self.body_b.position) * 0.5
    }

    /// Run the transition logic for one tick.
    ///
    /// `dt` and `elapsed` are already scaled by the animation speed.
    pub fn step(&mut self, cfg: &SimConfig, dt: f32, elapsed: f32) -> Option<SimEvent> {
        let event = match self.state {
            AnimationState::Approaching => self.approach(cfg, dt, elapsed),
            AnimationState::Colliding => self.collide(elapsed),
            AnimationState::Particles => None,
        };
        self.body_a.spin(elapsed);
        self.body_b.spin(elapsed);
        event
    }

    fn approach(&mut self, cfg: &SimConfig, dt: f32, elapsed: f32) -> Option<SimEvent> {
        let step = if cfg.frame_coupled_bodies {
            Body::STEP_PER_TICK
        } else {
            Body::STEP_PER_SECOND * dt
        };
        self.body_a.approach(cfg.body_a_speed, step, elapsed);
        self.body_b.approach(cfg.body_b_speed, step, elapsed);

        if self.collided || self.body_distance() > cfg.collision_distance {
            return None;
        }
        self.collided = true;
        self.collision_time = elapsed;
        self.state = AnimationState::Colliding;
        log::info!(
            "collision at t={:.3} (distance {:.3})",
            elapsed,
            self.body_distance()
        );
        Some(SimEvent::Collided { at: elapsed })
    }

    fn collide(&mut self, elapsed: f32) -> Option<SimEvent> {
        let duration = elapsed - self.collision_time;
        self.intensity = (duration * INTENSITY_RAMP).clamp(0.0, 1.0);
        if duration <= COLLIDE_HOLD {
            return None;
        }
        let origin = self.center();
        self.state = AnimationState::Particles;
        self.particles_started_at = Some(elapsed);
        self.body_a.visible = false;
        self.body_b.visible = false;
        log::info!("dissolved at t={:.3}, origin {:?}", elapsed, origin);
        Some(SimEvent::Dissolved { at: elapsed, origin })
    }

    /// Back to `Approaching` with bodies home and the latch cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CollisionMachine {
    fn default() -> Self {
        Self::new()
    }
}
