//! Advanced friendly AI: evasion, formation flying and threat memory.
//!
//! Additive layer on top of the base steering force. Mutates only the
//! drone's own `AdvancedAi` state.

use rand::Rng;
use swarm_core::components::{AdvancedAi, Drone};
use swarm_core::config::{AdvancedAiConfig, SwarmConfig};
use swarm_core::enums::Faction;
use swarm_core::memory::{ThreatMemory, ThreatSource};
use swarm_core::types::{heading_to, Vec2, EPSILON_DISTANCE};

use crate::context::{random_unit, Surroundings};

/// Weighted sum of the evasion, formation and memory terms.
///
/// Sightings are remembered first, then the memory ages by one tick, then
/// the surviving entries repel.
pub fn advanced_force(
    drone: &Drone,
    ai: &mut AdvancedAi,
    env: &Surroundings,
    cfg: &SwarmConfig,
    rng: &mut impl Rng,
) -> Vec2 {
    let acfg = &cfg.advanced;
    let evade = evasion(drone, ai, env, acfg, rng);
    let formation = formation(drone, env, acfg);
    ai.memory.tick();
    let memory = memory_repulsion(drone.position, &ai.memory, acfg);

    evade * acfg.evasion_weight + formation * acfg.formation_weight + memory * acfg.memory_weight
}

/// Random evasive impulses plus repulsion from nearby turrets and enemies.
/// Every threat felt is recorded in the drone's memory.
pub fn evasion(
    drone: &Drone,
    ai: &mut AdvancedAi,
    env: &Surroundings,
    acfg: &AdvancedAiConfig,
    rng: &mut impl Rng,
) -> Vec2 {
    let mut force = Vec2::ZERO;

    if ai.evasion_cooldown > 0 {
        ai.evasion_cooldown -= 1;
    } else if rng.gen::<f64>() < acfg.evasion_chance {
        force += random_unit(rng) * acfg.evasion_impulse;
        ai.evasion_cooldown = acfg.evasion_cooldown;
    }

    for turret in env.turrets {
        let (toward, dist) = heading_to(drone.position, turret.position);
        let reach = turret.range * acfg.turret_range_fraction;
        if dist < reach && dist > EPSILON_DISTANCE {
            force += -toward * (1.0 - dist / turret.range) * acfg.turret_gain;
            ai.memory
                .remember(ThreatSource::Turret(turret.id), turret.position, acfg.turret_memory_ttl);
        }
    }

    for enemy in env.living(Faction::Enemy) {
        let (toward, dist) = heading_to(drone.position, enemy.position);
        if dist < acfg.enemy_danger_radius && dist > EPSILON_DISTANCE {
            force += -toward * (1.0 - dist / acfg.enemy_danger_radius) * acfg.enemy_gain;
            ai.memory
                .remember(ThreatSource::Enemy(enemy.id), enemy.position, acfg.enemy_memory_ttl);
        }
    }

    force
}

/// Attract toward distant formation mates, repel from crowding, match velocity.
pub fn formation(drone: &Drone, env: &Surroundings, acfg: &AdvancedAiConfig) -> Vec2 {
    let mut count = 0usize;
    let mut centroid = Vec2::ZERO;
    let mut mean_velocity = Vec2::ZERO;

    for mate in env.living(Faction::Friendly) {
        if mate.id == drone.id || mate.position.distance(drone.position) >= acfg.formation_radius {
            continue;
        }
        count += 1;
        centroid += mate.position;
        mean_velocity += mate.velocity;
    }
    if count == 0 {
        return Vec2::ZERO;
    }

    let n = count as f64;
    let to_centroid = centroid / n - drone.position;
    let spread = to_centroid.length();

    let mut force = (mean_velocity / n - drone.velocity) * acfg.formation_align;
    if spread > acfg.formation_far_band {
        force += to_centroid * acfg.formation_attract;
    } else if spread < acfg.formation_near_band {
        force -= to_centroid * acfg.formation_repel;
    }
    force
}

/// Repulsion from remembered danger, fading with age and distance.
pub fn memory_repulsion(position: Vec2, memory: &ThreatMemory, acfg: &AdvancedAiConfig) -> Vec2 {
    memory
        .entries()
        .iter()
        .filter_map(|entry| {
            let (toward, dist) = heading_to(position, entry.position);
            if dist >= acfg.memory_radius || dist <= EPSILON_DISTANCE {
                return None;
            }
            let freshness = entry.ttl as f64 / acfg.memory_ttl_scale;
            Some(-toward * freshness * (1.0 - dist / acfg.memory_radius))
        })
        .sum()
}
