//! Per-tick trail animation: grow each segment toward its target and fade it.

use crate::api::config::SimConfig;
use crate::components::trail::{Trail, TrailPool};
use crate::systems::boundary::clamp_to_sphere;

/// Advance one trail by `dt`. `cfg` must already be sanitized.
pub fn step_trail(t: &mut Trail, cfg: &SimConfig, dt: f32) {
    if t.is_inert() {
        return;
    }
    t.age += dt;
    if t.is_inert() {
        return;
    }

    let ratio = t.life_ratio();
    let tip = t.start.lerp(t.target, ratio);
    t.tip = if cfg.confined {
        clamp_to_sphere(tip, cfg.inner_radius()).unwrap_or(tip)
    } else {
        tip
    };

    let alpha = (1.0 - ratio * cfg.trail_fade_rate).max(0.0);
    t.color = t.base_color.scaled(alpha);
}

pub fn animate_trails(pool: &mut TrailPool, cfg: &SimConfig, dt: f32) {
    if !pool.active || dt <= 0.0 {
        return;
    }
    for t in pool.trails_mut() {
        step_trail(t, cfg, dt);
    }
}
