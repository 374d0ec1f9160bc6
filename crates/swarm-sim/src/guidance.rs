//! Guidance for turret-launched rockets.
//!
//! Provides the predicted intercept point, one-tick rocket advancement with
//! its terminal conditions, and blast casualty selection.

use swarm_core::components::{Drone, Obstacle, Rocket};
use swarm_core::enums::RocketLoss;
use swarm_core::types::{heading_to, Vec2};

/// What the rocket knows about its target drone this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quarry {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
}

impl From<&Drone> for Quarry {
    fn from(d: &Drone) -> Self {
        Self {
            position: d.position,
            velocity: d.velocity,
            alive: d.alive,
        }
    }
}

/// Result of advancing a rocket by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RocketOutcome {
    /// Still in flight.
    Flying,
    /// Target inside blast radius. The caller applies the blast at the
    /// rocket's position.
    Detonated,
    /// Left play without a blast.
    Lost(RocketLoss),
}

/// Where the target will be after `lookahead` ticks at its current velocity.
pub fn predicted_intercept(position: Vec2, velocity: Vec2, lookahead: f64) -> Vec2 {
    position + velocity * lookahead
}

/// Advance one alive rocket by one tick and mark it inert when it terminates.
///
/// Order: target check, blast check, steer toward the predicted intercept,
/// integrate, obstacle collision, fuel.
pub fn advance(rocket: &mut Rocket, quarry: Option<Quarry>, obstacles: &[Obstacle]) -> RocketOutcome {
    let outcome = fly(rocket, quarry, obstacles);
    if outcome != RocketOutcome::Flying {
        rocket.alive = false;
    }
    outcome
}

fn fly(rocket: &mut Rocket, quarry: Option<Quarry>, obstacles: &[Obstacle]) -> RocketOutcome {
    let Some(quarry) = quarry.filter(|q| q.alive) else {
        return RocketOutcome::Lost(RocketLoss::TargetLost);
    };

    if rocket.position.distance(quarry.position) < rocket.blast_radius {
        return RocketOutcome::Detonated;
    }

    let aim = predicted_intercept(quarry.position, quarry.velocity, rocket.lookahead);
    let (dir, _) = heading_to(rocket.position, aim);
    rocket.velocity = dir * rocket.speed;
    rocket.position += rocket.velocity;

    if obstacles
        .iter()
        .any(|o| rocket.position.distance(o.position) < o.radius)
    {
        return RocketOutcome::Lost(RocketLoss::ObstacleCollision);
    }

    rocket.fuel = rocket.fuel.saturating_sub(1);
    if rocket.fuel == 0 {
        return RocketOutcome::Lost(RocketLoss::FuelExhausted);
    }
    RocketOutcome::Flying
}

/// Ids of alive drones of either faction strictly inside the blast.
pub fn blast_casualties<'a>(
    center: Vec2,
    radius: f64,
    drones: impl IntoIterator<Item = &'a Drone>,
) -> Vec<u32> {
    drones
        .into_iter()
        .filter(|d| d.alive && d.position.distance(center) < radius)
        .map(|d| d.id)
        .collect()
}
