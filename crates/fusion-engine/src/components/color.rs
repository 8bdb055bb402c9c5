//! Linear RGB colors for particles and trails.

use crate::core::rng::RandomSource;

/// RGB color, channels nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from hue (turns), saturation and lightness.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l);
        }
        let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let lo = 2.0 * l - hi;
        Self::new(
            hue_channel(lo, hi, h + 1.0 / 3.0),
            hue_channel(lo, hi, h),
            hue_channel(lo, hi, h - 1.0 / 3.0),
        )
    }

    /// Every channel multiplied by `k`.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

fn hue_channel(lo: f32, hi: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// Spread of hue jitter around the base hue.
pub const HUE_JITTER: f32 = 0.05;

/// Particle glow color: jittered hue, full saturation, lightness in [0.5, 0.7).
pub fn random_particle_color(base_hue: f32, rng: &mut impl RandomSource) -> Rgb {
    let hue = base_hue + rng.centered(HUE_JITTER);
    let lightness = 0.5 + rng.next_f32() * 0.2;
    Rgb::from_hsl(hue, 1.0, lightness)
}

/// Trail color: jittered hue, full saturation, fixed lightness.
pub fn random_trail_color(base_hue: f32, rng: &mut impl RandomSource) -> Rgb {
    let hue = base_hue + rng.centered(HUE_JITTER);
    Rgb::from_hsl(hue, 1.0, 0.6)
}
