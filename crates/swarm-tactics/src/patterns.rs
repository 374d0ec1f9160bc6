//! Enemy hunting behavior.
//!
//! Each enemy carries one attack pattern. `evaluate` picks the prey and an
//! aim point for that pattern, then adds obstacle and turret evasion. Pure
//! function: the caller commits the returned decision.

use rand::Rng;
use swarm_core::components::{Drone, EnemyBrain};
use swarm_core::config::{EnemyConfig, SwarmConfig};
use swarm_core::enums::{AttackPattern, Faction};
use swarm_core::types::{heading_to, unit_at, Vec2, EPSILON_DISTANCE};

use crate::context::{random_unit, Surroundings};

/// Output of one enemy evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDecision {
    pub prey: Option<u32>,
    pub ambush_point: Option<Vec2>,
    pub force: Vec2,
    /// Multiplier on max speed for this tick.
    pub speed_scale: f64,
    /// The pattern allows a melee attack this tick.
    pub melee_armed: bool,
}

/// Where a pattern wants to go.
struct Plan {
    prey: Option<u32>,
    aim: Option<Vec2>,
    ambush_point: Option<Vec2>,
    melee_armed: bool,
}

impl Plan {
    fn idle() -> Self {
        Self {
            prey: None,
            aim: None,
            ambush_point: None,
            melee_armed: false,
        }
    }
}

/// Evaluate one enemy drone.
pub fn evaluate(
    enemy: &Drone,
    brain: &EnemyBrain,
    env: &Surroundings,
    cfg: &SwarmConfig,
    rng: &mut impl Rng,
) -> EnemyDecision {
    let ecfg = &cfg.enemy;

    let plan = match brain.pattern {
        AttackPattern::Direct => plan_direct(enemy, brain, env),
        AttackPattern::Flanking => plan_flanking(enemy, brain, env, ecfg),
        AttackPattern::Ambush => plan_ambush(enemy, brain, env, ecfg, rng),
        AttackPattern::Swarm => plan_swarm(enemy, brain, env, ecfg),
    };

    let mut speed_scale = 1.0;
    if env.terrain.slope(enemy.position) > ecfg.steep_slope_degrees {
        speed_scale *= ecfg.steep_speed_factor;
    }

    let mut force = Vec2::ZERO;
    if let Some(aim) = plan.aim {
        let (dir, _) = heading_to(enemy.position, aim);
        let desired = dir * enemy.traits.max_speed * speed_scale;
        force += (desired - enemy.velocity).clamp_length_max(ecfg.max_force);
    }
    force += evasion(enemy.position, env, ecfg, rng);

    EnemyDecision {
        prey: plan.prey,
        ambush_point: plan.ambush_point,
        force,
        speed_scale,
        melee_armed: plan.melee_armed,
    }
}

/// Keep the locked prey while it lives, otherwise take the nearest friendly.
pub fn select_prey<'a>(enemy: &Drone, brain: &EnemyBrain, env: &Surroundings<'a>) -> Option<&'a Drone> {
    brain
        .prey
        .and_then(|id| env.drone(id))
        .filter(|d| d.alive && d.faction == Faction::Friendly)
        .or_else(|| env.nearest_friendly(enemy.position))
}

fn charge(enemy: &Drone, prey: &Drone) -> Plan {
    let in_range = enemy.position.distance(prey.position) < enemy.traits.attack_range;
    Plan {
        prey: Some(prey.id),
        aim: Some(prey.position),
        ambush_point: None,
        melee_armed: in_range,
    }
}

fn plan_direct(enemy: &Drone, brain: &EnemyBrain, env: &Surroundings) -> Plan {
    match select_prey(enemy, brain, env) {
        Some(prey) => charge(enemy, prey),
        None => Plan::idle(),
    }
}

fn plan_flanking(enemy: &Drone, brain: &EnemyBrain, env: &Surroundings, ecfg: &EnemyConfig) -> Plan {
    let Some(prey) = select_prey(enemy, brain, env) else {
        return Plan::idle();
    };
    let speed = prey.velocity.length();
    if speed <= ecfg.flank_min_prey_speed {
        return charge(enemy, prey);
    }
    let heading = prey.velocity / speed;
    let mut side = heading.perp();
    if (enemy.position - prey.position).dot(side) < 0.0 {
        side = -side;
    }
    let mut plan = charge(enemy, prey);
    plan.aim = Some(prey.position + side * ecfg.flank_distance);
    plan
}

/// Sample hide points behind obstacles near random prey and keep the best.
fn plan_ambush(
    enemy: &Drone,
    brain: &EnemyBrain,
    env: &Surroundings,
    ecfg: &EnemyConfig,
    rng: &mut impl Rng,
) -> Plan {
    // Keep an existing hide point while its prey lives and stays near it.
    let kept = match (brain.prey.and_then(|id| env.drone(id)), brain.ambush_point) {
        (Some(prey), Some(point))
            if prey.alive
                && prey.faction == Faction::Friendly
                && prey.position.distance(point) <= 2.0 * ecfg.ambush_cover_search =>
        {
            Some((prey.id, point))
        }
        _ => None,
    };

    let chosen = kept.or_else(|| sample_ambush_point(enemy, env, ecfg, rng));
    let Some((prey_id, point)) = chosen else {
        // No cover anywhere near the swarm: hunt directly.
        return plan_direct(enemy, brain, env);
    };

    let sprung = enemy.position.distance(point) < ecfg.ambush_trigger_radius
        && env
            .living(Faction::Friendly)
            .any(|d| d.position.distance(enemy.position) < enemy.traits.attack_range);

    Plan {
        prey: Some(prey_id),
        aim: Some(point),
        ambush_point: Some(point),
        melee_armed: sprung,
    }
}

/// Best hide point over the configured number of samples, with its prey.
pub fn sample_ambush_point(
    enemy: &Drone,
    env: &Surroundings,
    ecfg: &EnemyConfig,
    rng: &mut impl Rng,
) -> Option<(u32, Vec2)> {
    let prey: Vec<&Drone> = env.living(Faction::Friendly).collect();
    if prey.is_empty() {
        return None;
    }

    let mut best: Option<(u32, Vec2, f64)> = None;
    for _ in 0..ecfg.ambush_samples {
        let victim = prey[rng.gen_range(0..prey.len())];
        let Some(cover) = env
            .obstacles
            .iter()
            .find(|o| o.position.distance(victim.position) < ecfg.ambush_cover_search)
        else {
            continue;
        };
        let (to_victim, dist) = heading_to(cover.position, victim.position);
        if dist <= EPSILON_DISTANCE {
            continue;
        }
        let point = cover.position - to_victim * cover.radius * ecfg.ambush_cover_offset;

        let mut score = -point.distance(enemy.position) - 0.5 * point.distance(victim.position);
        if !env.terrain.line_of_sight_clear(point, victim.position) {
            score += ecfg.ambush_hidden_bonus;
        }
        if best.map_or(true, |(_, _, s)| score > s) {
            best = Some((victim.id, point, score));
        }
    }
    best.map(|(id, point, _)| (id, point))
}

/// Ring slot around the friendly nearest the enemy pack's centroid.
fn plan_swarm(enemy: &Drone, brain: &EnemyBrain, env: &Surroundings, ecfg: &EnemyConfig) -> Plan {
    let pack: Vec<&Drone> = env.living(Faction::Enemy).collect();
    let Some(slot) = pack.iter().position(|d| d.id == enemy.id) else {
        return plan_direct(enemy, brain, env);
    };
    if pack.len() < 2 {
        return plan_direct(enemy, brain, env);
    }

    let centroid = pack.iter().map(|d| d.position).sum::<Vec2>() / pack.len() as f64;
    let Some(prey) = env.nearest_friendly(centroid) else {
        return Plan::idle();
    };

    let angle = std::f64::consts::TAU * slot as f64 / pack.len() as f64;
    let mut plan = charge(enemy, prey);
    plan.aim = Some(prey.position + unit_at(angle) * ecfg.swarm_ring_radius);
    plan
}

/// Obstacle and turret evasion. Both grow as 1/clearance near the hazard.
pub fn evasion(position: Vec2, env: &Surroundings, ecfg: &EnemyConfig, rng: &mut impl Rng) -> Vec2 {
    let mut force = Vec2::ZERO;

    for obstacle in env.obstacles {
        let (toward, dist) = heading_to(position, obstacle.position);
        if dist < obstacle.radius + ecfg.obstacle_margin {
            let away = if dist > EPSILON_DISTANCE { -toward } else { random_unit(rng) };
            force += away / (dist - obstacle.radius).max(0.1) * ecfg.obstacle_weight;
        }
    }

    for turret in env.turrets {
        let (toward, dist) = heading_to(position, turret.position);
        if dist < turret.range * ecfg.turret_range_factor {
            let away = if dist > EPSILON_DISTANCE { -toward } else { random_unit(rng) };
            force += away / (dist - ecfg.turret_standoff).max(0.1) * ecfg.turret_weight;
        }
    }

    force
}
