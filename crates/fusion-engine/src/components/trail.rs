//! Fixed-capacity trail pool. A trail is a line segment growing from its
//! start point toward a random target inside the boundary sphere.

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::Lifecycle;
use crate::components::color::{random_trail_color, Rgb};
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    /// Fixed start of the segment, relative to the pool origin.
    pub start: Vec3,
    /// Point the segment grows toward.
    pub target: Vec3,
    /// Current visible end of the segment.
    pub tip: Vec3,
    pub age: f32,
    pub max_life: f32,
    /// Color at full brightness, fixed for the life of the pool.
    pub base_color: Rgb,
    /// Faded color, shared by both endpoints.
    pub color: Rgb,
}

impl Trail {
    pub const MIN_LIFETIME: f32 = 3.0;
    pub const LIFETIME_SPREAD: f32 = 4.0;

    pub fn seed(cfg: &SimConfig, rng: &mut impl RandomSource) -> Self {
        let base_color = random_trail_color(cfg.particle_hue, rng);
        let target = Self::random_target(cfg.boundary_radius, rng);
        let max_life = rng.next_f32() * Self::LIFETIME_SPREAD + Self::MIN_LIFETIME;
        Self {
            start: Vec3::ZERO,
            target,
            tip: Vec3::ZERO,
            age: 0.0,
            max_life,
            base_color,
            color: base_color,
        }
    }

    /// Random direction scaled to `[0.5, 1.0) × radius`.
    pub fn random_target(radius: f32, rng: &mut impl RandomSource) -> Vec3 {
        let dir = rng.unit_vector();
        dir * (radius * (0.5 + rng.next_f32() * 0.5))
    }

    pub fn is_inert(&self) -> bool {
        self.age >= self.max_life
    }

    pub fn life_ratio(&self) -> f32 {
        (self.age / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct TrailPool {
    trails: Vec<Trail>,
    pub origin: Vec3,
    pub active: bool,
}

impl TrailPool {
    pub fn new(capacity: usize, cfg: &SimConfig, rng: &mut impl RandomSource) -> Self {
        let trails = (0..capacity).map(|_| Trail::seed(cfg, rng)).collect();
        Self {
            trails,
            origin: Vec3::ZERO,
            active: false,
        }
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Trail> {
        self.trails.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trail> {
        self.trails.iter()
    }

    pub(crate) fn trails_mut(&mut self) -> &mut [Trail] {
        &mut self.trails
    }

    pub fn activate(&mut self, origin: Vec3) {
        self.origin = origin;
        self.active = true;
        for t in &mut self.trails {
            t.age = 0.0;
            t.tip = t.start;
            t.color = t.base_color;
        }
    }

    /// Deactivate, pick new targets and zero ages.
    pub fn reset(&mut self, cfg: &SimConfig, rng: &mut impl RandomSource) {
        self.active = false;
        self.origin = Vec3::ZERO;
        for t in &mut self.trails {
            t.target = Trail::random_target(cfg.boundary_radius, rng);
            t.age = 0.0;
            t.tip = t.start;
            t.color = t.base_color;
        }
    }

    pub fn lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.trails
            .get(index)
            .map(|t| Lifecycle::classify(self.active, t.age, t.max_life))
    }
}
