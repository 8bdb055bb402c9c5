pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::context::SimContext;
pub use api::types::{AnimationState, Lifecycle, SimEvent};
pub use components::body::{Body, BodySide};
pub use components::color::Rgb;
pub use components::particle::{Particle, ParticlePool};
pub use components::trail::{Trail, TrailPool};
pub use core::rng::{RandomSource, Rng, SequenceRng};
pub use core::time::SimClock;
pub use renderer::frame::FrameResult;
pub use renderer::instance::{BodyInstance, ParticleInstance, TrailVertex};
pub use bridge::protocol::ProtocolLayout;
pub use systems::collision::{CollisionMachine, COLLIDE_HOLD};
pub use systems::particles::integrate_particles;
pub use systems::trails::animate_trails;
