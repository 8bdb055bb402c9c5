use glam::Vec3;

/// Which of the two colliding bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySide {
    /// Starts at -X, travels toward +X.
    A,
    /// Starts at +X, travels toward -X.
    B,
}

impl BodySide {
    /// Direction of travel along the X axis.
    pub fn heading(self) -> f32 {
        match self {
            BodySide::A => 1.0,
            BodySide::B => -1.0,
        }
    }

    /// Resting position before the approach begins.
    pub fn home(self) -> Vec3 {
        Vec3::new(-self.heading() * Body::START_OFFSET, 0.0, 0.0)
    }

    /// Vertical bob as a function of elapsed time.
    pub fn bob(self, elapsed: f32) -> f32 {
        match self {
            BodySide::A => (elapsed * 2.0).sin() * Body::BOB_AMPLITUDE,
            BodySide::B => (elapsed * 1.8).cos() * Body::BOB_AMPLITUDE,
        }
    }

    /// Spin (x, y, z radians) as a function of elapsed time.
    pub fn spin(self, elapsed: f32) -> Vec3 {
        match self {
            BodySide::A => Vec3::new(elapsed * 0.3, elapsed * 0.5, 0.0),
            BodySide::B => Vec3::new(elapsed * 0.6, -elapsed * 0.4, 0.0),
        }
    }
}

/// One of the two approaching bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub side: BodySide,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub visible: bool,
}

impl Body {
    /// Distance from the origin each body starts at.
    pub const START_OFFSET: f32 = 6.0;
    pub const BOB_AMPLITUDE: f32 = 0.3;
    /// X step per tick at speed 1.0 when bodies move per frame.
    pub const STEP_PER_TICK: f32 = 0.02;
    /// X step per second at speed 1.0 when bodies move per second (60 Hz equivalent).
    pub const STEP_PER_SECOND: f32 = Self::STEP_PER_TICK * 60.0;

    pub fn new(side: BodySide) -> Self {
        Self {
            side,
            position: side.home(),
            rotation: Vec3::ZERO,
            visible: true,
        }
    }

    /// Back to the home position, visible, unrotated.
    pub fn reset(&mut self) {
        *self = Self::new(self.side);
    }

    /// Advance the approach by one tick.
    ///
    /// `step` is the X distance to cover at speed 1.0 for this tick.
    pub fn approach(&mut self, speed: f32, step: f32, elapsed: f32) {
        self.position.x += self.side.heading() * speed * step;
        self.position.y = self.side.bob(elapsed);
    }

    /// Update spin if visible.
    pub fn spin(&mut self, elapsed: f32) {
        if self.visible {
            self.rotation = self.side.spin(elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_start_six_units_out() {
        assert_eq!(Body::new(BodySide::A).position, Vec3::new(-6.0, 0.0, 0.0));
        assert_eq!(Body::new(BodySide::B).position, Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn approach_moves_toward_center() {
        let mut a = Body::new(BodySide::A);
        let mut b = Body::new(BodySide::B);
        a.approach(1.0, Body::STEP_PER_TICK, 0.0);
        b.approach(2.0, Body::STEP_PER_TICK, 0.0);
        assert!((a.position.x + 5.98).abs() < 1e-6);
        assert!((b.position.x - 5.96).abs() < 1e-6);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut a = Body::new(BodySide::A);
        for i in 0..200 {
            a.approach(0.0, Body::STEP_PER_TICK, i as f32 * 0.05);
            assert!(a.position.y.abs() <= Body::BOB_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn hidden_body_keeps_rotation() {
        let mut b = Body::new(BodySide::B);
        b.spin(1.0);
        let r = b.rotation;
        b.visible = false;
        b.spin(2.0);
        assert_eq!(b.rotation, r);
    }

    #[test]
    fn reset_restores_home() {
        let mut a = Body::new(BodySide::A);
        a.approach(3.0, 1.0, 0.7);
        a.visible = false;
        a.spin(4.0);
        a.reset();
        assert_eq!(a, Body::new(BodySide::A));
    }
}
