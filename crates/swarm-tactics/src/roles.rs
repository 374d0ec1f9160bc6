//! Role-specific forces for enhanced friendly drones.

use std::f64::consts::TAU;

use rand::Rng;
use swarm_core::components::Drone;
use swarm_core::config::{RoleConfig, SwarmConfig};
use swarm_core::enums::{Faction, OperationalRole};
use swarm_core::types::{heading_to, unit_at, Vec2};

use crate::context::Surroundings;

/// Heading risks closer than this are treated as equal.
const RISK_TOLERANCE: f64 = 1e-9;

/// Extra force contributed by the drone's role, already weighted.
/// Zero when the role has nothing to do this tick.
pub fn role_force(
    drone: &Drone,
    role: OperationalRole,
    env: &Surroundings,
    cfg: &SwarmConfig,
    rng: &mut impl Rng,
) -> Vec2 {
    let rcfg = &cfg.roles;
    let force = match role {
        OperationalRole::Scout if drone.target.is_none() => scout(drone, env, rcfg, rng),
        OperationalRole::Attacker => attacker(drone, env, rcfg),
        OperationalRole::Defender => defender(drone, env, rcfg),
        OperationalRole::Support => support(drone, env, rcfg),
        OperationalRole::Scout => Vec2::ZERO,
    };
    force * rcfg.force_weight
}

/// Head for a random least-occupied cell of a coarse grid over the field.
pub fn scout(drone: &Drone, env: &Surroundings, rcfg: &RoleConfig, rng: &mut impl Rng) -> Vec2 {
    let n = rcfg.scout_grid_size;
    let cell_span = env.field.size / (n.max(2) - 1) as f64;
    let mut occupancy = vec![0u32; n * n];
    for d in env.living(Faction::Friendly) {
        let gx = (d.position.x / cell_span) as usize;
        let gy = (d.position.y / cell_span) as usize;
        if gx < n && gy < n {
            occupancy[gy * n + gx] += 1;
        }
    }

    let fewest = occupancy.iter().copied().min().unwrap_or(0);
    let candidates: Vec<usize> = (0..occupancy.len())
        .filter(|&i| occupancy[i] == fewest)
        .collect();
    if candidates.is_empty() {
        return Vec2::ZERO;
    }
    let cell = candidates[rng.gen_range(0..candidates.len())];
    let goal = Vec2::new((cell % n) as f64, (cell / n) as f64) * cell_span;

    let (dir, _) = heading_to(drone.position, goal);
    dir * drone.traits.max_speed * rcfg.scout_speed_fraction
}

/// Pick the approach heading least aligned with detecting turrets, favoring
/// headings whose probe point is hidden from the target.
pub fn attacker(drone: &Drone, env: &Surroundings, rcfg: &RoleConfig) -> Vec2 {
    let Some(target) = drone.target.and_then(|id| env.target(id)).filter(|t| t.alive) else {
        return Vec2::ZERO;
    };
    let (to_target, _) = heading_to(drone.position, target.position);

    let mut best: Option<(Vec2, f64, f64)> = None;
    for k in 0..rcfg.attacker_headings {
        let heading = unit_at(TAU * k as f64 / rcfg.attacker_headings as f64);

        let mut risk = 0.0;
        for turret in env.turrets.iter().filter(|t| t.detects(drone.position)) {
            let (to_turret, dist) = heading_to(drone.position, turret.position);
            risk += heading.dot(to_turret).max(0.0) / dist.max(0.1);
        }

        let probe = drone.position + heading * rcfg.attacker_probe_distance;
        if env.field.contains(probe) && !env.terrain.line_of_sight_clear(probe, target.position) {
            risk -= 1.0;
        }

        // Equal risk: prefer the heading closest to the target.
        let progress = heading.dot(to_target);
        let better = match best {
            None => true,
            Some((_, r, p)) => {
                risk < r - RISK_TOLERANCE || ((risk - r).abs() <= RISK_TOLERANCE && progress > p)
            }
        };
        if better {
            best = Some((heading, risk, progress));
        }
    }

    best.map_or(Vec2::ZERO, |(heading, _, _)| heading * drone.traits.max_speed)
}

/// Stand between the nearest threatened ally and the turret nearest to it.
pub fn defender(drone: &Drone, env: &Surroundings, rcfg: &RoleConfig) -> Vec2 {
    let threatened = env
        .living(Faction::Friendly)
        .filter(|d| d.id != drone.id)
        .filter(|d| env.turrets.iter().any(|t| t.detects(d.position)))
        .min_by(|a, b| {
            a.position
                .distance_squared(drone.position)
                .total_cmp(&b.position.distance_squared(drone.position))
        });
    let Some(ally) = threatened else {
        return Vec2::ZERO;
    };
    let Some(turret) = env.turrets.iter().min_by(|a, b| {
        a.position
            .distance_squared(ally.position)
            .total_cmp(&b.position.distance_squared(ally.position))
    }) else {
        return Vec2::ZERO;
    };

    let (threat_dir, _) = heading_to(turret.position, ally.position);
    if threat_dir == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let guard_post = ally.position - threat_dir * rcfg.defender_offset;
    let (dir, _) = heading_to(drone.position, guard_post);
    dir * drone.traits.max_speed
}

/// Fill the least-populated angular sector around the swarm center.
pub fn support(drone: &Drone, env: &Surroundings, rcfg: &RoleConfig) -> Vec2 {
    let positions: Vec<Vec2> = env.living(Faction::Friendly).map(|d| d.position).collect();
    if positions.len() < 2 {
        return Vec2::ZERO;
    }
    let center = positions.iter().copied().sum::<Vec2>() / positions.len() as f64;

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            total += a.distance(*b);
            pairs += 1;
        }
    }
    let spacing = total / pairs as f64;

    let sectors: Vec<Vec2> = (0..rcfg.support_sectors)
        .map(|k| unit_at(TAU * k as f64 / rcfg.support_sectors as f64))
        .collect();
    let mut counts = vec![0u32; sectors.len()];
    for p in &positions {
        let (rel, _) = heading_to(center, *p);
        for (count, sector) in counts.iter_mut().zip(&sectors) {
            if rel.dot(*sector) > rcfg.support_sector_alignment {
                *count += 1;
            }
        }
    }

    // First sector with the fewest members.
    let mut emptiest = 0;
    for (k, &c) in counts.iter().enumerate() {
        if c < counts[emptiest] {
            emptiest = k;
        }
    }
    let goal = center + sectors[emptiest] * spacing;
    let (dir, _) = heading_to(drone.position, goal);
    dir * drone.traits.max_speed
}
