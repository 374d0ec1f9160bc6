//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2-D vector in field space (abstract units, x = East, y = North).
pub type Vec2 = glam::DVec2;

/// Distances below this are treated as coincident points.
pub const EPSILON_DISTANCE: f64 = 1e-6;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed steps.
    pub tick: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// The square playing field `[0, size]²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub size: f64,
}

impl Field {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.size).contains(&p.x) && (0.0..=self.size).contains(&p.y)
    }

    /// Clamp a position into the field without touching velocity.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, Vec2::splat(self.size))
    }

    /// Clamp a position into the field. Any velocity component that carried the
    /// position through a wall is reflected and scaled by `restitution`.
    pub fn bounce(&self, mut position: Vec2, mut velocity: Vec2, restitution: f64) -> (Vec2, Vec2) {
        if position.x < 0.0 || position.x > self.size {
            position.x = position.x.clamp(0.0, self.size);
            velocity.x *= -restitution;
        }
        if position.y < 0.0 || position.y > self.size {
            position.y = position.y.clamp(0.0, self.size);
            velocity.y *= -restitution;
        }
        (position, velocity)
    }
}

/// Unit direction and distance from `from` to `to`.
/// The direction is zero when the points coincide.
pub fn heading_to(from: Vec2, to: Vec2) -> (Vec2, f64) {
    let delta = to - from;
    let dist = delta.length();
    if dist > EPSILON_DISTANCE {
        (delta / dist, dist)
    } else {
        (Vec2::ZERO, dist)
    }
}

/// Clamp a velocity magnitude to `max_speed`, preserving heading.
pub fn clamp_speed(velocity: Vec2, max_speed: f64) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Unit vector at `angle` radians from +x, counter-clockwise.
pub fn unit_at(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
