pub mod body;
pub mod color;
pub mod particle;
pub mod trail;
