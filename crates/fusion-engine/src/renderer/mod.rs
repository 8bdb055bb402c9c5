pub mod frame;
pub mod instance;

pub use frame::FrameResult;
pub use instance::{BodyInstance, ParticleInstance, TrailVertex};
