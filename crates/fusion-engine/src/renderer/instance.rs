use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::body::Body;
use crate::components::color::Rgb;
use crate::components::particle::Particle;

/// Per-body transform and shader inputs.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation in radians.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// 1.0 = visible, 0.0 = hidden.
    pub visible: f32,
    /// Collision glow, 0..1.
    pub intensity: f32,
    /// Shape morph factor, 0..1.
    pub morph: f32,
    /// Scaled elapsed time for shader animation.
    pub time: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_body(body: &Body, intensity: f32, morph: f32, time: f32) -> Self {
        Self {
            x: body.position.x,
            y: body.position.y,
            z: body.position.z,
            rot_x: body.rotation.x,
            rot_y: body.rotation.y,
            rot_z: body.rotation.z,
            visible: if body.visible { 1.0 } else { 0.0 },
            intensity,
            morph,
            time,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn is_visible(&self) -> bool {
        self.visible > 0.5
    }
}

/// One point sprite. Position is relative to the pool origin.
/// 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub size: f32,
    pub _pad: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_particle(p: &Particle) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            r: p.color.r,
            g: p.color.g,
            b: p.color.b,
            size: p.size,
            _pad: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// One endpoint of a trail segment. Two per trail (start, tip).
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl TrailVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(position: Vec3, color: Rgb) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
