/// SharedArrayBuffer layout.
/// Must stay in sync with the JavaScript reader (`protocol.js`).
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 20 floats]
/// [Bodies: 2 × 12 floats]
/// [Particles: max_particles × 8 floats]
/// [Trails: max_trails × 2 vertices × 6 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The reader takes them from the header to compute offsets.
use crate::api::types::SimEvent;
use crate::renderer::frame::FrameResult;
use crate::renderer::instance::{BodyInstance, ParticleInstance, TrailVertex};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
/// Slot 0 is reserved for a reader/writer lock; the writer leaves it at 0.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_STATE: usize = 3;
pub const HEADER_MAX_PARTICLES: usize = 4;
pub const HEADER_PARTICLE_COUNT: usize = 5;
pub const HEADER_MAX_TRAILS: usize = 6;
pub const HEADER_TRAIL_COUNT: usize = 7;
pub const HEADER_INTENSITY: usize = 8;
pub const HEADER_MORPH: usize = 9;
pub const HEADER_TIME: usize = 10;
pub const HEADER_ORIGIN_X: usize = 11;
pub const HEADER_ORIGIN_Y: usize = 12;
pub const HEADER_ORIGIN_Z: usize = 13;
pub const HEADER_TRAIL_OPACITY: usize = 14;
pub const HEADER_SPHERE_RADIUS: usize = 15;
pub const HEADER_VISIBILITY: usize = 16;
pub const HEADER_EVENTS: usize = 17;
pub const HEADER_PARTICLES_STARTED_AT: usize = 18;
// Slot 19 is reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Number of bodies. Fixed by the wire format.
pub const BODY_COUNT: usize = 2;

/// Visibility bits in `HEADER_VISIBILITY`.
pub const VISIBLE_PARTICLES: u32 = 1;
pub const VISIBLE_TRAILS: u32 = 2;
pub const VISIBLE_SPHERE: u32 = 4;

/// Event bits in `HEADER_EVENTS`, set for the frame an event happened in.
pub const EVENT_COLLIDED: u32 = 1;
pub const EVENT_DISSOLVED: u32 = 2;
pub const EVENT_RESET: u32 = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_particles: usize,
    pub max_trails: usize,

    /// Size of body data section in floats.
    pub body_data_floats: usize,
    /// Size of particle data section in floats.
    pub particle_data_floats: usize,
    /// Size of trail data section in floats.
    pub trail_data_floats: usize,

    /// Offset (in floats) where body data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where particle data begins.
    pub particle_data_offset: usize,
    /// Offset (in floats) where trail data begins.
    pub trail_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from pool capacities.
    pub fn new(max_particles: usize, max_trails: usize) -> Self {
        let body_data_floats = BODY_COUNT * BodyInstance::FLOATS;
        let particle_data_floats = max_particles * ParticleInstance::FLOATS;
        let trail_data_floats = max_trails * 2 * TrailVertex::FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let particle_data_offset = body_data_offset + body_data_floats;
        let trail_data_offset = particle_data_offset + particle_data_floats;

        let buffer_total_floats = trail_data_offset + trail_data_floats;

        Self {
            max_particles,
            max_trails,
            body_data_floats,
            particle_data_floats,
            trail_data_floats,
            body_data_offset,
            particle_data_offset,
            trail_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Layout sized to the buffers of an existing frame.
    pub fn from_frame(frame: &FrameResult) -> Self {
        Self::new(frame.particle_count(), frame.trail_count())
    }

    /// Write `frame` into `out`, which must be `buffer_total_floats` long.
    ///
    /// Entities beyond the layout capacity are dropped; the header counts
    /// report what was actually written.
    pub fn write_frame(&self, frame: &FrameResult, frame_counter: u32, out: &mut [f32]) {
        if out.len() < self.buffer_total_floats {
            log::warn!(
                "protocol: buffer too small ({} < {} floats)",
                out.len(),
                self.buffer_total_floats
            );
            return;
        }

        let particle_count = frame.particles.len().min(self.max_particles);
        let trail_count = frame.trail_count().min(self.max_trails);

        let header = &mut out[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_STATE] = frame.state.code();
        header[HEADER_MAX_PARTICLES] = self.max_particles as f32;
        header[HEADER_PARTICLE_COUNT] = particle_count as f32;
        header[HEADER_MAX_TRAILS] = self.max_trails as f32;
        header[HEADER_TRAIL_COUNT] = trail_count as f32;
        header[HEADER_INTENSITY] = frame.intensity;
        header[HEADER_MORPH] = frame.morph;
        header[HEADER_TIME] = frame.time;
        header[HEADER_ORIGIN_X] = frame.origin.x;
        header[HEADER_ORIGIN_Y] = frame.origin.y;
        header[HEADER_ORIGIN_Z] = frame.origin.z;
        header[HEADER_TRAIL_OPACITY] = frame.trail_opacity;
        header[HEADER_SPHERE_RADIUS] = frame.sphere_radius;
        header[HEADER_VISIBILITY] = visibility_bits(frame) as f32;
        header[HEADER_EVENTS] = event_bits(&frame.events) as f32;
        header[HEADER_PARTICLES_STARTED_AT] = frame.particles_started_at.unwrap_or(-1.0);

        copy_section(out, self.body_data_offset, bytemuck::cast_slice(&frame.bodies[..]));
        copy_section(
            out,
            self.particle_data_offset,
            bytemuck::cast_slice(&frame.particles[..particle_count]),
        );
        copy_section(
            out,
            self.trail_data_offset,
            bytemuck::cast_slice(&frame.trails[..trail_count * 2]),
        );
    }
}

fn copy_section(out: &mut [f32], offset: usize, data: &[f32]) {
    out[offset..offset + data.len()].copy_from_slice(data);
}

fn visibility_bits(frame: &FrameResult) -> u32 {
    let mut bits = 0;
    if frame.particles_visible {
        bits |= VISIBLE_PARTICLES;
    }
    if frame.trails_visible {
        bits |= VISIBLE_TRAILS;
    }
    if frame.sphere_visible {
        bits |= VISIBLE_SPHERE;
    }
    bits
}

fn event_bits(events: &[SimEvent]) -> u32 {
    events.iter().fold(0, |bits, e| {
        bits | match e {
            SimEvent::Collided { .. } => EVENT_COLLIDED,
            SimEvent::Dissolved { .. } => EVENT_DISSOLVED,
            SimEvent::Reset => EVENT_RESET,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use crate::api::context::SimContext;
    use crate::api::types::AnimationState;
    use glam::Vec3;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(600, 20);
        assert_eq!(layout.body_data_offset, 20);
        assert_eq!(layout.particle_data_offset, 20 + 24);
        assert_eq!(layout.trail_data_offset, 20 + 24 + 600 * 8);
        assert_eq!(layout.buffer_total_floats, 20 + 24 + 600 * 8 + 20 * 12);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn write_frame_packs_header_and_sections() {
        let cfg = SimConfig { particle_count: 10, trail_count: 4, ..SimConfig::default() };
        let ctx = SimContext::new(&cfg);
        let layout = ProtocolLayout::from_frame(ctx.frame());
        let mut buf = vec![0.0; layout.buffer_total_floats];
        layout.write_frame(ctx.frame(), 7, &mut buf);

        assert_eq!(buf[HEADER_LOCK], 0.0);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[HEADER_STATE], AnimationState::Approaching.code());
        assert_eq!(buf[HEADER_PARTICLE_COUNT], 10.0);
        assert_eq!(buf[HEADER_TRAIL_COUNT], 4.0);
        assert_eq!(buf[HEADER_VISIBILITY], 0.0);
        assert_eq!(buf[HEADER_PARTICLES_STARTED_AT], -1.0);
        // Body A x lives at the start of the body section.
        assert_eq!(buf[layout.body_data_offset], -6.0);
        assert_eq!(buf[layout.body_data_offset + BodyInstance::FLOATS], 6.0);
        let p0 = &ctx.frame().particles[0];
        assert_eq!(buf[layout.particle_data_offset + 6], p0.size);
    }

    #[test]
    fn event_and_visibility_bits() {
        let mut frame = FrameResult::default();
        frame.particles_visible = true;
        frame.sphere_visible = true;
        frame.events = vec![
            SimEvent::Collided { at: 1.0 },
            SimEvent::Dissolved { at: 2.0, origin: Vec3::ZERO },
        ];
        assert_eq!(visibility_bits(&frame), VISIBLE_PARTICLES | VISIBLE_SPHERE);
        assert_eq!(event_bits(&frame.events), EVENT_COLLIDED | EVENT_DISSOLVED);
    }

    #[test]
    fn short_buffer_is_left_untouched() {
        let frame = FrameResult::default();
        let layout = ProtocolLayout::new(4, 4);
        let mut buf = vec![9.0; 3];
        layout.write_frame(&frame, 1, &mut buf);
        assert!(buf.iter().all(|v| *v == 9.0));
    }
}
