use serde::{Deserialize, Serialize};

/// Tunable parameters, read fresh by the simulation every tick.
///
/// Field names serialize as camelCase so a parameter panel can post its
/// state object straight through [`SimConfig::from_json`]. Missing fields
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Approach speed of body A (moves toward +X).
    pub body_a_speed: f32,
    /// Approach speed of body B (moves toward -X).
    pub body_b_speed: f32,
    /// Bodies collide once their centers are this close.
    pub collision_distance: f32,
    /// Multiplier on wall-clock time. Applied by the tick driver.
    pub animation_speed: f32,
    /// Scale on particle velocity when integrating position.
    pub particle_speed: f32,
    /// Nominal particle size; base sizes are drawn from `[0.5, 1.5) × size`.
    pub particle_size: f32,
    /// Nominal lifetime in seconds; drawn from `[0.5, 1.5) × lifetime`.
    pub particle_lifetime: f32,
    /// Per-axis spread of initial particle velocity.
    pub explosion_force: f32,
    /// Radius of the sphere confining particles and trails.
    pub boundary_radius: f32,
    /// Opacity of the trail material.
    pub trail_opacity: f32,
    /// Base hue for particle colors, in turns.
    pub particle_hue: f32,
    /// Velocity multiplier applied every tick.
    pub damping: f32,
    /// Velocity multiplier applied on a boundary bounce.
    pub restitution: f32,
    /// Amplitude of the sinusoidal velocity perturbation.
    pub turbulence_gain: f32,
    /// How far trail colors fade by the end of their life.
    pub trail_fade_rate: f32,
    /// Downward acceleration on particles. Zero disables it.
    pub gravity: f32,
    /// Enables the sinusoidal velocity perturbation.
    pub turbulence: bool,
    /// Confines particles and trails to the boundary sphere.
    pub confined: bool,
    /// Bodies advance a fixed step per tick instead of per second.
    pub frame_coupled_bodies: bool,
    /// Particle pool capacity. Read at construction only.
    pub particle_count: usize,
    /// Trail pool capacity. Read at construction only.
    pub trail_count: usize,
    /// Seed for the default random source. Read at construction only.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            body_a_speed: 1.0,
            body_b_speed: 1.0,
            collision_distance: 2.2,
            animation_speed: 1.0,
            particle_speed: 1.2,
            particle_size: 0.12,
            particle_lifetime: 12.0,
            explosion_force: 2.5,
            boundary_radius: 3.0,
            trail_opacity: 0.3,
            particle_hue: 0.33,
            damping: 0.93,
            restitution: 0.7,
            turbulence_gain: 0.15,
            trail_fade_rate: 0.7,
            gravity: 0.0,
            turbulence: true,
            confined: true,
            frame_coupled_bodies: true,
            particle_count: 600,
            trail_count: 20,
            seed: 42,
        }
    }
}

/// Replace non-finite values with `default`, then clamp into `[min, max]`.
fn bounded(value: f32, default: f32, min: f32, max: f32) -> f32 {
    let v = if value.is_finite() { value } else { default };
    v.clamp(min, max)
}

impl SimConfig {
    pub const MIN_LIFETIME: f32 = 0.01;
    pub const MIN_BOUNDARY_RADIUS: f32 = 0.01;
    pub const MIN_COLLISION_DISTANCE: f32 = 0.01;
    pub const MIN_PARTICLE_SIZE: f32 = 0.001;
    pub const MAX_PARTICLES: usize = 100_000;
    pub const MAX_TRAILS: usize = 10_000;
    /// Upper bound for damping and restitution. Bounces always lose energy.
    pub const MAX_DISSIPATION: f32 = 0.999;

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON (for panel round-trips and presets).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Copy with every field pulled into its valid range.
    ///
    /// The simulation only ever reads sanitized values, so lifetimes and
    /// radii are never zero and nothing downstream divides by zero.
    /// Silent; called on every tick.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let hue = if self.particle_hue.is_finite() {
            self.particle_hue.rem_euclid(1.0)
        } else {
            d.particle_hue
        };
        Self {
            body_a_speed: bounded(self.body_a_speed, d.body_a_speed, 0.0, 10.0),
            body_b_speed: bounded(self.body_b_speed, d.body_b_speed, 0.0, 10.0),
            collision_distance: bounded(
                self.collision_distance,
                d.collision_distance,
                Self::MIN_COLLISION_DISTANCE,
                20.0,
            ),
            animation_speed: bounded(self.animation_speed, d.animation_speed, 0.0, 10.0),
            particle_speed: bounded(self.particle_speed, d.particle_speed, 0.0, 20.0),
            particle_size: bounded(self.particle_size, d.particle_size, Self::MIN_PARTICLE_SIZE, 2.0),
            particle_lifetime: bounded(
                self.particle_lifetime,
                d.particle_lifetime,
                Self::MIN_LIFETIME,
                120.0,
            ),
            explosion_force: bounded(self.explosion_force, d.explosion_force, 0.0, 50.0),
            boundary_radius: bounded(
                self.boundary_radius,
                d.boundary_radius,
                Self::MIN_BOUNDARY_RADIUS,
                100.0,
            ),
            trail_opacity: bounded(self.trail_opacity, d.trail_opacity, 0.0, 1.0),
            particle_hue: hue,
            damping: bounded(self.damping, d.damping, 0.0, Self::MAX_DISSIPATION),
            restitution: bounded(self.restitution, d.restitution, 0.0, Self::MAX_DISSIPATION),
            turbulence_gain: bounded(self.turbulence_gain, d.turbulence_gain, 0.0, 10.0),
            trail_fade_rate: bounded(self.trail_fade_rate, d.trail_fade_rate, 0.0, 1.0),
            gravity: bounded(self.gravity, d.gravity, -100.0, 100.0),
            turbulence: self.turbulence,
            confined: self.confined,
            frame_coupled_bodies: self.frame_coupled_bodies,
            particle_count: self.particle_count.clamp(1, Self::MAX_PARTICLES),
            trail_count: self.trail_count.clamp(1, Self::MAX_TRAILS),
            seed: self.seed,
        }
    }

    /// Sanitize a newly accepted config, logging once if anything was clamped.
    pub fn accepted(self) -> Self {
        let out = self.sanitized();
        if out != self {
            log::debug!("config: clamped out-of-range values");
        }
        out
    }

    /// Radius particles and trail tips are held inside.
    pub fn inner_radius(&self) -> f32 {
        self.boundary_radius * crate::systems::boundary::BOUNDARY_MARGIN
    }
}
