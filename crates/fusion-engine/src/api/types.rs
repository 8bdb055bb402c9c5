use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Phase of the collision sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    /// Bodies drift toward each other.
    #[default]
    Approaching,
    /// Bodies touched; intensity ramps up before dissolving.
    Colliding,
    /// Bodies are gone; particles and trails run.
    Particles,
}

impl AnimationState {
    /// Numeric code written into the shared-buffer header.
    pub fn code(self) -> f32 {
        match self {
            AnimationState::Approaching => 0.0,
            AnimationState::Colliding => 1.0,
            AnimationState::Particles => 2.0,
        }
    }
}

/// Where a single particle or trail is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Pool not yet activated.
    Dormant,
    /// Running, first half of life.
    Active,
    /// Running, second half of life.
    Fading,
    /// Life used up. State is frozen until reset.
    Inert,
}

impl Lifecycle {
    /// Life ratio at which an entity counts as fading.
    pub const FADE_THRESHOLD: f32 = 0.5;

    pub fn classify(pool_active: bool, age: f32, max_life: f32) -> Self {
        if !pool_active {
            Lifecycle::Dormant
        } else if age >= max_life {
            Lifecycle::Inert
        } else if age / max_life >= Self::FADE_THRESHOLD {
            Lifecycle::Fading
        } else {
            Lifecycle::Active
        }
    }
}

/// A state change the presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// The collision latch fired.
    Collided { at: f32 },
    /// Bodies dissolved; pools were activated around `origin`.
    Dissolved { at: f32, origin: Vec3 },
    /// The sequence was reset to its initial state.
    Reset,
}
