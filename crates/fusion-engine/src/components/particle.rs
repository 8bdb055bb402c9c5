//! Fixed-capacity particle pool.
//!
//! Particles are never added or removed after construction. Each one keeps
//! its index for the lifetime of the pool, which also serves as its
//! turbulence phase. Reset and activation rewrite records in place.

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::Lifecycle;
use crate::components::color::{random_particle_color, Rgb};
use crate::core::rng::RandomSource;

/// A single particle record.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position relative to the pool origin.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since activation.
    pub age: f32,
    /// Seconds until the particle goes inert.
    pub max_life: f32,
    pub base_size: f32,
    /// Size after age-based shrink.
    pub size: f32,
    pub base_color: Rgb,
    /// Color after age-based darkening.
    pub color: Rgb,
}

impl Particle {
    /// Fraction of base size left at the end of life.
    pub const SIZE_FLOOR: f32 = 0.5;
    /// Fraction of brightness lost by the end of life.
    pub const DARKEN: f32 = 0.4;

    /// Fresh particle at the origin with randomized velocity, lifetime, size and color.
    pub fn seed(cfg: &SimConfig, rng: &mut impl RandomSource) -> Self {
        let velocity = Self::random_velocity(cfg.explosion_force, rng);
        let max_life = Self::random_lifetime(cfg.particle_lifetime, rng);
        let base_size = Self::random_size(cfg.particle_size, rng);
        let base_color = random_particle_color(cfg.particle_hue, rng);
        Self {
            position: Vec3::ZERO,
            velocity,
            age: 0.0,
            max_life,
            base_size,
            size: base_size,
            base_color,
            color: base_color,
        }
    }

    /// Per-axis velocity in `[-force/2, force/2)`.
    pub fn random_velocity(force: f32, rng: &mut impl RandomSource) -> Vec3 {
        Vec3::new(rng.centered(force), rng.centered(force), rng.centered(force))
    }

    /// Lifetime in `[0.5, 1.5) × nominal`, never below the configured minimum.
    pub fn random_lifetime(nominal: f32, rng: &mut impl RandomSource) -> f32 {
        (rng.next_f32() * nominal + nominal * 0.5).max(SimConfig::MIN_LIFETIME)
    }

    /// Size in `[0.5, 1.5) × nominal`.
    pub fn random_size(nominal: f32, rng: &mut impl RandomSource) -> f32 {
        rng.next_f32() * nominal + nominal * 0.5
    }

    pub fn is_inert(&self) -> bool {
        self.age >= self.max_life
    }

    pub fn life_ratio(&self) -> f32 {
        (self.age / self.max_life).clamp(0.0, 1.0)
    }

    /// Back to a just-spawned state with a new velocity.
    fn restart(&mut self, velocity: Vec3) {
        self.position = Vec3::ZERO;
        self.velocity = velocity;
        self.age = 0.0;
        self.size = self.base_size;
        self.color = self.base_color;
    }
}

/// Fixed-capacity particle storage.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// World-space center the particle positions are relative to.
    pub origin: Vec3,
    /// Whether the pool has been activated this run.
    pub active: bool,
}

impl ParticlePool {
    pub fn new(capacity: usize, cfg: &SimConfig, rng: &mut impl RandomSource) -> Self {
        let particles = (0..capacity).map(|_| Particle::seed(cfg, rng)).collect();
        Self {
            particles,
            origin: Vec3::ZERO,
            active: false,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Start every particle from the given origin.
    pub fn activate(&mut self, origin: Vec3) {
        self.origin = origin;
        self.active = true;
        for p in &mut self.particles {
            let v = p.velocity;
            p.restart(v);
        }
    }

    /// Deactivate, re-roll velocities and zero ages. Lifetimes, sizes and colors keep their rolls.
    pub fn reset(&mut self, cfg: &SimConfig, rng: &mut impl RandomSource) {
        self.active = false;
        self.origin = Vec3::ZERO;
        for p in &mut self.particles {
            let v = Particle::random_velocity(cfg.explosion_force, rng);
            p.restart(v);
        }
    }

    /// Re-roll base sizes from the current nominal size.
    pub fn resize(&mut self, nominal: f32, rng: &mut impl RandomSource) {
        for p in &mut self.particles {
            p.base_size = Particle::random_size(nominal, rng);
            if !self.active {
                p.size = p.base_size;
            }
        }
    }

    /// Re-roll base colors around a new hue.
    pub fn recolor(&mut self, hue: f32, rng: &mut impl RandomSource) {
        for p in &mut self.particles {
            p.base_color = random_particle_color(hue, rng);
            if !self.active {
                p.color = p.base_color;
            }
        }
    }

    pub fn lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.particles
            .get(index)
            .map(|p| Lifecycle::classify(self.active, p.age, p.max_life))
    }

    /// Number of particles still moving.
    pub fn live_count(&self) -> usize {
        if !self.active {
            return 0;
        }
        self.particles.iter().filter(|p| !p.is_inert()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, SequenceRng};

    #[test]
    fn seed_with_centered_draws() {
        let cfg = SimConfig::default();
        let mut rng = SequenceRng::constant(0.5);
        let p = Particle::seed(&cfg, &mut rng);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!((p.max_life - cfg.particle_lifetime).abs() < 1e-5);
        assert!((p.base_size - cfg.particle_size).abs() < 1e-6);
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.age, 0.0);
    }

    #[test]
    fn seeded_ranges() {
        let cfg = SimConfig::default();
        let mut rng = Rng::new(11);
        let pool = ParticlePool::new(500, &cfg, &mut rng);
        assert_eq!(pool.len(), 500);
        for p in pool.iter() {
            let half = cfg.explosion_force / 2.0;
            assert!(p.velocity.x.abs() <= half && p.velocity.y.abs() <= half && p.velocity.z.abs() <= half);
            assert!(p.max_life >= cfg.particle_lifetime * 0.5 && p.max_life < cfg.particle_lifetime * 1.5);
            assert!(p.base_size >= cfg.particle_size * 0.5 && p.base_size < cfg.particle_size * 1.5);
        }
    }

    #[test]
    fn pool_starts_dormant() {
        let cfg = SimConfig::default();
        let pool = ParticlePool::new(4, &cfg, &mut Rng::new(1));
        assert!(!pool.active);
        assert_eq!(pool.lifecycle(0), Some(Lifecycle::Dormant));
        assert_eq!(pool.lifecycle(4), None);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn activate_sets_origin_and_restarts() {
        let cfg = SimConfig::default();
        let mut pool = ParticlePool::new(8, &cfg, &mut Rng::new(1));
        pool.particles_mut()[0].age = 3.0;
        pool.particles_mut()[0].position = Vec3::ONE;
        pool.activate(Vec3::new(0.5, 0.1, 0.0));
        assert!(pool.active);
        assert_eq!(pool.origin, Vec3::new(0.5, 0.1, 0.0));
        assert_eq!(pool.get(0).unwrap().age, 0.0);
        assert_eq!(pool.get(0).unwrap().position, Vec3::ZERO);
        assert_eq!(pool.live_count(), 8);
    }

    #[test]
    fn reset_rerolls_velocity_keeps_capacity() {
        let cfg = SimConfig::default();
        let mut rng = Rng::new(5);
        let mut pool = ParticlePool::new(16, &cfg, &mut rng);
        let before: Vec<Vec3> = pool.iter().map(|p| p.velocity).collect();
        pool.activate(Vec3::ONE);
        pool.particles_mut()[3].age = 99.0;
        pool.reset(&cfg, &mut rng);
        assert_eq!(pool.len(), 16);
        assert!(!pool.active);
        assert!(pool.iter().all(|p| p.age == 0.0 && p.position == Vec3::ZERO));
        let after: Vec<Vec3> = pool.iter().map(|p| p.velocity).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn resize_rerolls_base_sizes() {
        let cfg = SimConfig::default();
        let mut rng = Rng::new(2);
        let mut pool = ParticlePool::new(32, &cfg, &mut rng);
        pool.resize(1.0, &mut rng);
        for p in pool.iter() {
            assert!(p.base_size >= 0.5 && p.base_size < 1.5);
            assert_eq!(p.size, p.base_size);
        }
    }

    #[test]
    fn recolor_changes_hue() {
        let cfg = SimConfig::default();
        let mut rng = Rng::new(2);
        let mut pool = ParticlePool::new(32, &cfg, &mut rng);
        // Pure red region.
        pool.recolor(0.0, &mut rng);
        for p in pool.iter() {
            assert!(p.color.r >= p.color.g && p.color.r >= p.color.b);
        }
    }
}
