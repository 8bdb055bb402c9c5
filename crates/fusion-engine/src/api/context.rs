use crate::api::config::SimConfig;
use crate::api::types::{AnimationState, Lifecycle, SimEvent};
use crate::components::particle::ParticlePool;
use crate::components::trail::TrailPool;
use crate::core::rng::{RandomSource, Rng};
use crate::renderer::frame::FrameResult;
use crate::systems::collision::CollisionMachine;
use crate::systems::particles::integrate_particles;
use crate::systems::trails::animate_trails;

/// The whole simulation, owned by the caller.
///
/// One `tick` per display frame. Within a tick the state machine runs first,
/// then (in `Particles`) the integrator and trail animator, then the frame
/// result is rebuilt. `reset` rebuilds the frame too, so a caller never sees
/// a half-reset state.
pub struct SimContext<R: RandomSource = Rng> {
    machine: CollisionMachine,
    particles: ParticlePool,
    trails: TrailPool,
    rng: R,
    frame: FrameResult,
    last_elapsed: f32,
}

impl SimContext<Rng> {
    /// Build pools sized from `cfg`, seeded from `cfg.seed`.
    pub fn new(cfg: &SimConfig) -> Self {
        Self::with_rng(cfg, Rng::new(cfg.seed))
    }
}

impl<R: RandomSource> SimContext<R> {
    /// Build pools sized from `cfg`, drawing all randomness from `rng`.
    pub fn with_rng(cfg: &SimConfig, mut rng: R) -> Self {
        let cfg = cfg.sanitized();
        let particles = ParticlePool::new(cfg.particle_count, &cfg, &mut rng);
        let trails = TrailPool::new(cfg.trail_count, &cfg, &mut rng);
        let machine = CollisionMachine::new();
        let mut frame = FrameResult::with_capacity(particles.len(), trails.len());
        frame.rebuild(&machine, &particles, &trails, &cfg, 0.0);
        log::info!(
            "simulation ready: {} particles, {} trails",
            particles.len(),
            trails.len()
        );
        Self {
            machine,
            particles,
            trails,
            rng,
            frame,
            last_elapsed: 0.0,
        }
    }

    /// Advance by one frame.
    ///
    /// `dt` and `elapsed` are scaled by the animation speed already. `cfg` is
    /// re-read (and sanitized) on every call; pool capacities are fixed.
    pub fn tick(&mut self, cfg: &SimConfig, dt: f32, elapsed: f32) -> &FrameResult {
        let cfg = cfg.sanitized();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let elapsed = if elapsed.is_finite() { elapsed } else { self.last_elapsed };
        self.last_elapsed = elapsed;
        self.frame.events.clear();

        let was_running = self.machine.state() == AnimationState::Particles;
        if let Some(event) = self.machine.step(&cfg, dt, elapsed) {
            if let SimEvent::Dissolved { origin, .. } = event {
                self.particles.activate(origin);
                self.trails.activate(origin);
            }
            self.frame.events.push(event);
        }

        // Pools activated this tick start integrating on the next one.
        if was_running {
            integrate_particles(&mut self.particles, &cfg, dt);
            animate_trails(&mut self.trails, &cfg, dt);
        }

        self.frame
            .rebuild(&self.machine, &self.particles, &self.trails, &cfg, elapsed);
        &self.frame
    }

    /// Return to `Approaching`: bodies home and visible, latch cleared,
    /// particle velocities and trail targets re-rolled, all ages zeroed.
    pub fn reset(&mut self, cfg: &SimConfig) -> &FrameResult {
        let cfg = cfg.sanitized();
        self.machine.reset();
        self.particles.reset(&cfg, &mut self.rng);
        self.trails.reset(&cfg, &mut self.rng);
        self.frame
            .rebuild(&self.machine, &self.particles, &self.trails, &cfg, self.last_elapsed);
        self.frame.events.clear();
        self.frame.events.push(SimEvent::Reset);
        log::info!("simulation reset");
        &self.frame
    }

    /// Re-roll particle base sizes after a size change.
    pub fn resize_particles(&mut self, cfg: &SimConfig) {
        let cfg = cfg.sanitized();
        self.particles.resize(cfg.particle_size, &mut self.rng);
        self.rebuild_frame(&cfg);
    }

    /// Re-roll particle base colors after a hue change.
    pub fn recolor_particles(&mut self, cfg: &SimConfig) {
        let cfg = cfg.sanitized();
        self.particles.recolor(cfg.particle_hue, &mut self.rng);
        self.rebuild_frame(&cfg);
    }

    fn rebuild_frame(&mut self, cfg: &SimConfig) {
        self.frame
            .rebuild(&self.machine, &self.particles, &self.trails, cfg, self.last_elapsed);
    }

    pub fn state(&self) -> AnimationState {
        self.machine.state()
    }

    pub fn frame(&self) -> &FrameResult {
        &self.frame
    }

    pub fn machine(&self) -> &CollisionMachine {
        &self.machine
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn trails(&self) -> &TrailPool {
        &self.trails
    }

    pub fn particle_lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.particles.lifecycle(index)
    }

    pub fn trail_lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.trails.lifecycle(index)
    }
}
