use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::{AnimationState, SimEvent};
use crate::components::particle::ParticlePool;
use crate::components::trail::TrailPool;
use crate::renderer::instance::{BodyInstance, ParticleInstance, TrailVertex};
use crate::systems::collision::CollisionMachine;

/// Everything the presentation layer needs to draw one frame.
///
/// Rebuilt in place every tick; the particle and trail buffers keep their
/// length (pool capacity) for the life of the simulation.
#[derive(Debug, Clone, Default)]
pub struct FrameResult {
    pub state: AnimationState,
    pub bodies: [BodyInstance; 2],
    pub particles: Vec<ParticleInstance>,
    /// Two vertices per trail: start, then tip.
    pub trails: Vec<TrailVertex>,
    /// World-space center of the particle and trail systems.
    pub origin: Vec3,
    pub particles_visible: bool,
    pub trails_visible: bool,
    /// Containment sphere shell around the particle field.
    pub sphere_visible: bool,
    pub sphere_radius: f32,
    pub intensity: f32,
    pub morph: f32,
    /// Scaled elapsed time, for shader uniforms.
    pub time: f32,
    pub trail_opacity: f32,
    pub particles_started_at: Option<f32>,
    /// Transitions that happened during the tick that produced this frame.
    pub events: Vec<SimEvent>,
}

impl FrameResult {
    pub fn with_capacity(particles: usize, trails: usize) -> Self {
        Self {
            particles: Vec::with_capacity(particles),
            trails: Vec::with_capacity(trails * 2),
            events: Vec::with_capacity(4),
            ..Self::default()
        }
    }

    /// Refill from current simulation state.
    pub fn rebuild(
        &mut self,
        machine: &CollisionMachine,
        particles: &ParticlePool,
        trails: &TrailPool,
        cfg: &SimConfig,
        time: f32,
    ) {
        self.state = machine.state();
        self.intensity = machine.intensity();
        self.morph = machine.morph();
        self.time = time;
        self.bodies = [
            BodyInstance::from_body(&machine.body_a, self.intensity, self.morph, time),
            BodyInstance::from_body(&machine.body_b, self.intensity, self.morph, time),
        ];

        self.particles.clear();
        self.particles
            .extend(particles.iter().map(ParticleInstance::from_particle));

        self.trails.clear();
        for t in trails.iter() {
            self.trails.push(TrailVertex::new(t.start, t.color));
            self.trails.push(TrailVertex::new(t.tip, t.color));
        }

        self.origin = particles.origin;
        self.particles_visible = particles.active;
        self.trails_visible = trails.active;
        self.sphere_visible = self.state == AnimationState::Particles;
        self.sphere_radius = cfg.boundary_radius;
        self.trail_opacity = cfg.trail_opacity;
        self.particles_started_at = machine.particles_started_at();
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len() / 2
    }
}
