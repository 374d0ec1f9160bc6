//! Steering engine for friendly drones.
//!
//! Sums independently weighted terms: target seeking, obstacle repulsion,
//! learned turret avoidance and flocking, then damps the total on steep
//! ground. The caller integrates the result.

use rand::Rng;
use swarm_core::components::{Drone, Obstacle, Turret};
use swarm_core::config::SwarmConfig;
use swarm_core::memory::LearnedAvoidance;
use swarm_core::types::{heading_to, Vec2, EPSILON_DISTANCE};

use crate::context::{random_unit, Surroundings};

/// Result of one steering evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringOutput {
    pub force: Vec2,
    /// Target inside attack range this tick. Seeking is replaced by the attack.
    pub attack: Option<u32>,
    /// Largest raw `(1 - d/range)^2` over the turrets covering the drone.
    /// Learned factors do not enter it.
    pub turret_pressure: f64,
}

/// Compute the steering force for a friendly drone.
pub fn compute_force(
    drone: &Drone,
    learned: &LearnedAvoidance,
    env: &Surroundings,
    cfg: &SwarmConfig,
    rng: &mut impl Rng,
) -> SteeringOutput {
    let st = &cfg.steering;
    let traits = &drone.traits;
    let mut out = SteeringOutput::default();

    // Target seeking
    if let Some(target) = drone.target.and_then(|id| env.target(id)).filter(|t| t.alive) {
        let (dir, dist) = heading_to(drone.position, target.position);
        if dist < traits.attack_range {
            out.attack = Some(target.id);
        } else {
            let desired = dir * traits.max_speed;
            out.force +=
                (desired - drone.velocity) * st.weight_target_seeking * traits.attack_strength;
        }
    }

    for obstacle in env.obstacles {
        out.force += obstacle_repulsion(drone.position, obstacle, st.obstacle_avoidance_distance, rng)
            * st.weight_obstacle_avoidance
            * traits.avoidance_strength;
    }

    for turret in env.turrets {
        let factor = learned.factor(turret.id, cfg.learning.initial_avoid_factor);
        if let Some((push, pressure)) = turret_repulsion(drone.position, turret, factor, rng) {
            out.force += push * st.weight_turret_avoidance * traits.avoidance_strength;
            out.turret_pressure = out.turret_pressure.max(pressure);
        }
    }

    out.force += flocking(drone, env, cfg, rng);

    let slope = env.terrain.slope(drone.position);
    out.force *= slope_damping(slope, cfg);
    out
}

/// Quadratic repulsion inside `radius + avoidance_distance`.
pub fn obstacle_repulsion(
    position: Vec2,
    obstacle: &Obstacle,
    avoidance_distance: f64,
    rng: &mut impl Rng,
) -> Vec2 {
    let effective = obstacle.radius + avoidance_distance;
    let (toward, dist) = heading_to(position, obstacle.position);
    if dist >= effective {
        return Vec2::ZERO;
    }
    let away = if dist > EPSILON_DISTANCE {
        -toward
    } else {
        random_unit(rng)
    };
    let falloff = 1.0 - dist / effective;
    away * falloff * falloff
}

/// Repulsion from a turret whose range contains `position`. Returns the push
/// vector, scaled by the learned factor, and the unscaled falloff squared.
pub fn turret_repulsion(
    position: Vec2,
    turret: &Turret,
    learned_factor: f64,
    rng: &mut impl Rng,
) -> Option<(Vec2, f64)> {
    if !turret.detects(position) {
        return None;
    }
    let (toward, dist) = heading_to(position, turret.position);
    let away = if dist > EPSILON_DISTANCE {
        -toward
    } else {
        random_unit(rng)
    };
    let falloff = 1.0 - dist / turret.range;
    let pressure = falloff * falloff;
    Some((away * pressure * learned_factor, pressure))
}

/// Cohesion, separation and alignment over alive friendly neighbors within
/// perception range.
pub fn flocking(drone: &Drone, env: &Surroundings, cfg: &SwarmConfig, rng: &mut impl Rng) -> Vec2 {
    let st = &cfg.steering;
    let traits = &drone.traits;
    let range = traits.perception_range;

    let mut count = 0usize;
    let mut centroid = Vec2::ZERO;
    let mut mean_velocity = Vec2::ZERO;
    let mut separation = Vec2::ZERO;

    for other in env.living(drone.faction) {
        if other.id == drone.id {
            continue;
        }
        let offset = drone.position - other.position;
        let dist = offset.length();
        if dist >= range {
            continue;
        }
        count += 1;
        centroid += other.position;
        mean_velocity += other.velocity;
        if dist > EPSILON_DISTANCE {
            separation += offset / dist * (range / dist);
        } else {
            separation += random_unit(rng) * range;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    let n = count as f64;
    let cohesion = (centroid / n - drone.position) * st.weight_cohesion * traits.cohesion_strength;
    let alignment =
        (mean_velocity / n - drone.velocity) * st.weight_alignment * traits.alignment_strength;
    cohesion + alignment + separation * st.weight_separation * traits.separation_strength
}

/// Force scale on steep ground: 1 below the threshold, then a linear ramp
/// down to the configured floor.
pub fn slope_damping(slope_degrees: f64, cfg: &SwarmConfig) -> f64 {
    let st = &cfg.steering;
    if slope_degrees > st.steep_slope_degrees {
        (1.0 - (slope_degrees - st.steep_slope_degrees) / st.slope_damping_span)
            .max(st.min_slope_damping)
    } else {
        1.0
    }
}
