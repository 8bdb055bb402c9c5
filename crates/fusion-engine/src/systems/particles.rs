//! Per-tick particle integration.
//!
//! Each particle touches only its own record and the shared config, so the
//! loop order does not matter.

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::components::particle::{Particle, ParticlePool};
use crate::systems::boundary::{clamp_to_sphere, direction_or_default, reflect};

/// Angular frequencies of the turbulence term per axis.
const TURBULENCE_FREQ: Vec3 = Vec3::new(2.5, 2.0, 2.2);

/// Velocity perturbation for particle `index` at `age`. The index acts as
/// a per-particle phase so neighbors never move in lockstep.
#[inline]
pub fn turbulence(age: f32, index: usize, gain: f32) -> Vec3 {
    let phase = index as f32;
    Vec3::new(
        (age * TURBULENCE_FREQ.x + phase).sin(),
        (age * TURBULENCE_FREQ.y + phase).cos(),
        (age * TURBULENCE_FREQ.z + phase).sin(),
    ) * gain
}

/// Advance one particle by `dt`. Returns true if it bounced off the boundary.
///
/// `cfg` must already be sanitized.
pub fn step_particle(p: &mut Particle, index: usize, cfg: &SimConfig, dt: f32) -> bool {
    if p.is_inert() {
        return false;
    }
    p.age += dt;
    if p.is_inert() {
        return false;
    }

    p.position += p.velocity * dt * cfg.particle_speed;

    if cfg.turbulence {
        p.velocity += turbulence(p.age, index, cfg.turbulence_gain) * dt;
    }
    if cfg.gravity != 0.0 {
        p.velocity.y -= cfg.gravity * dt;
    }
    p.velocity *= cfg.damping;

    let mut bounced = false;
    if cfg.confined {
        if let Some(clamped) = clamp_to_sphere(p.position, cfg.inner_radius()) {
            p.position = clamped;
            let normal = direction_or_default(clamped);
            p.velocity = reflect(p.velocity, normal) * cfg.restitution;
            bounced = true;
        }
    }

    let ratio = p.life_ratio();
    p.size = p.base_size * (1.0 - ratio * (1.0 - Particle::SIZE_FLOOR));
    p.color = p.base_color.scaled(1.0 - ratio * Particle::DARKEN);

    bounced
}

/// Advance every particle in an active pool. Returns the number of bounces.
pub fn integrate_particles(pool: &mut ParticlePool, cfg: &SimConfig, dt: f32) -> usize {
    if !pool.active || dt <= 0.0 {
        return 0;
    }
    let mut bounces = 0;
    for (i, p) in pool.particles_mut().iter_mut().enumerate() {
        if step_particle(p, i, cfg, dt) {
            bounces += 1;
        }
    }
    bounces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Rgb;
    use crate::core::rng::Rng;

    fn particle_at(position: Vec3, velocity: Vec3) -> Particle {
        Particle {
            position,
            velocity,
            age: 0.0,
            max_life: 10.0,
            base_size: 0.1,
            size: 0.1,
            base_color: Rgb::new(0.0, 1.0, 0.0),
            color: Rgb::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn bounce_clamps_and_reflects() {
        let cfg = SimConfig { particle_speed: 1.0, ..SimConfig::default() };
        let mut p = particle_at(Vec3::new(2.9, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let bounced = step_particle(&mut p, 0, &cfg, 0.1);
        assert!(bounced);
        assert!((p.position - Vec3::new(2.85, 0.0, 0.0)).length() < 1e-5, "{:?}", p.position);
        assert!(p.velocity.x < 0.0);
        assert!(p.velocity.length() < 5.0);
    }

    #[test]
    fn bounce_is_dissipative() {
        let cfg = SimConfig { turbulence: false, ..SimConfig::default() };
        let mut p = particle_at(Vec3::new(0.0, 2.8, 0.0), Vec3::new(1.0, 8.0, -2.0));
        let pre = p.velocity.length() * cfg.damping;
        assert!(step_particle(&mut p, 3, &cfg, 0.05));
        assert!(p.velocity.length() <= pre + 1e-5);
    }

    #[test]
    fn bounce_loses_speed_even_with_oversized_factors() {
        let cfg = SimConfig {
            restitution: 1.5,
            damping: 1.5,
            turbulence: false,
            particle_speed: 1.0,
            ..SimConfig::default()
        }
        .sanitized();
        let mut p = particle_at(Vec3::new(2.9, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let pre = p.velocity.length();
        assert!(step_particle(&mut p, 0, &cfg, 0.1));
        assert!(p.velocity.length() < pre, "{} !< {}", p.velocity.length(), pre);
    }

    #[test]
    fn damping_settles_motion() {
        let cfg = SimConfig { turbulence: false, ..SimConfig::default() };
        let mut p = particle_at(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0));
        for _ in 0..100 {
            step_particle(&mut p, 0, &cfg, 0.016);
        }
        assert!(p.velocity.length() < 0.01);
    }

    #[test]
    fn inert_particle_is_frozen() {
        let cfg = SimConfig::default();
        let mut p = particle_at(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        p.max_life = 0.05;
        step_particle(&mut p, 0, &cfg, 0.1);
        assert!(p.is_inert());
        let snapshot = p.clone();
        step_particle(&mut p, 0, &cfg, 0.1);
        assert_eq!(p, snapshot);
    }

    #[test]
    fn size_and_color_decay_with_age() {
        let cfg = SimConfig { turbulence: false, ..SimConfig::default() };
        let mut p = particle_at(Vec3::ZERO, Vec3::ZERO);
        p.max_life = 1.0;
        for _ in 0..9 {
            step_particle(&mut p, 0, &cfg, 0.1);
        }
        // ratio 0.9
        assert!((p.size - 0.1 * (1.0 - 0.9 * 0.5)).abs() < 1e-4, "{}", p.size);
        assert!((p.color.g - (1.0 - 0.9 * 0.4)).abs() < 1e-4, "{}", p.color.g);
        assert!(p.size >= p.base_size * Particle::SIZE_FLOOR);
    }

    #[test]
    fn turbulence_differs_by_index() {
        let a = turbulence(1.0, 0, 1.0);
        let b = turbulence(1.0, 1, 1.0);
        assert_ne!(a, b);
        assert!(turbulence(1.0, 5, 0.0).length() == 0.0);
    }

    #[test]
    fn gravity_pulls_down() {
        let cfg = SimConfig { gravity: 9.8, turbulence: false, damping: 1.0, ..SimConfig::default() };
        let mut p = particle_at(Vec3::ZERO, Vec3::ZERO);
        step_particle(&mut p, 0, &cfg, 0.1);
        assert!(p.velocity.y < 0.0);
    }

    #[test]
    fn unconfined_particles_leave_the_sphere() {
        let cfg = SimConfig { confined: false, turbulence: false, damping: 1.0, ..SimConfig::default() };
        let mut p = particle_at(Vec3::new(2.9, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        assert!(!step_particle(&mut p, 0, &cfg, 0.1));
        assert!(p.position.x > cfg.inner_radius());
    }

    #[test]
    fn particle_at_origin_escaping_is_safe() {
        // Degenerate direction must not produce NaN.
        let cfg = SimConfig { boundary_radius: SimConfig::MIN_BOUNDARY_RADIUS, turbulence: false, ..SimConfig::default() }
            .sanitized();
        let mut p = particle_at(Vec3::ZERO, Vec3::ZERO);
        step_particle(&mut p, 0, &cfg, 0.1);
        assert!(p.position.is_finite() && p.velocity.is_finite());
    }

    #[test]
    fn pool_stays_inside_boundary() {
        let cfg = SimConfig { explosion_force: 40.0, particle_speed: 5.0, ..SimConfig::default() };
        let mut rng = Rng::new(21);
        let mut pool = ParticlePool::new(300, &cfg, &mut rng);
        pool.activate(Vec3::ZERO);
        let limit = cfg.inner_radius() + 1e-4;
        for _ in 0..400 {
            integrate_particles(&mut pool, &cfg, 1.0 / 60.0);
            for p in pool.iter() {
                assert!(p.position.length() <= limit, "{}", p.position.length());
            }
        }
    }

    #[test]
    fn dormant_pool_does_not_move() {
        let cfg = SimConfig::default();
        let mut pool = ParticlePool::new(10, &cfg, &mut Rng::new(1));
        integrate_particles(&mut pool, &cfg, 0.1);
        assert!(pool.iter().all(|p| p.age == 0.0 && p.position == Vec3::ZERO));
    }
}
