//! Snapshot system: queries the ECS world and builds views and statistics.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use swarm_core::components::*;
use swarm_core::enums::DroneStatus;
use swarm_core::state::*;
use swarm_core::types::SimTime;

/// Build a complete `WorldView` from the current world state.
pub fn build_view(world: &World, time: &SimTime, field_size: f64, tally: &CombatTally) -> WorldView {
    WorldView {
        time: *time,
        field_size,
        drones: build_drones(world),
        targets: build_targets(world),
        turrets: build_turrets(world),
        obstacles: build_obstacles(world),
        rockets: build_rockets(world),
        statistics: build_statistics(world, time, tally),
    }
}

/// Aggregate counters for the current tick.
pub fn build_statistics(world: &World, time: &SimTime, tally: &CombatTally) -> Statistics {
    let mut stats = Statistics {
        step_count: time.tick,
        turret_kills: tally.turret_kills,
        melee_kills: tally.melee_kills,
        rocket_kills: tally.rocket_kills,
        rocket_detonations: tally.rocket_detonations,
        status_counts: DroneStatus::ALL.iter().map(|s| (*s, 0)).collect(),
        ..Default::default()
    };

    for (_, drone) in world.query::<&Drone>().iter() {
        if !drone.is_friendly() {
            if drone.alive {
                stats.enemies_alive += 1;
            }
            continue;
        }
        if drone.alive {
            stats.drones_alive += 1;
        }
        if drone.is_active() {
            stats.drones_active += 1;
        }
        *stats.status_counts.entry(drone.status).or_insert(0) += 1;
    }

    for (_, target) in world.query::<&Target>().iter() {
        if target.alive {
            stats.targets_remaining += 1;
        } else {
            stats.targets_destroyed += 1;
        }
    }

    stats.rockets_in_flight = world
        .query::<&Rocket>()
        .iter()
        .filter(|(_, r)| r.alive)
        .count() as u32;

    stats
}

/// Drones of both factions, sorted by id.
fn build_drones(world: &World) -> Vec<DroneView> {
    let mut drones: Vec<DroneView> = world
        .query::<(
            &Drone,
            Option<&Trajectory>,
            Option<&EnemyBrain>,
            Option<&RoleBrain>,
        )>()
        .iter()
        .map(|(_, (drone, trail, brain, role))| DroneView {
            id: drone.id,
            faction: drone.faction,
            position: drone.position,
            velocity: drone.velocity,
            fuel: drone.fuel,
            alive: drone.alive,
            status: drone.status,
            target: match brain {
                Some(brain) => brain.prey,
                None => drone.target,
            },
            pattern: brain.map(|b| b.pattern),
            role: role.map(|r| r.role),
            trail: trail
                .map(|t| t.points.iter().copied().collect())
                .unwrap_or_default(),
        })
        .collect();
    drones.sort_by_key(|d| d.id);
    drones
}

fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<&Target>()
        .iter()
        .map(|(_, t)| TargetView {
            id: t.id,
            position: t.position,
            alive: t.alive,
            assigned_drones: t.assigned_drones,
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}

fn build_turrets(world: &World) -> Vec<TurretView> {
    let mut turrets: Vec<TurretView> = world
        .query::<&Turret>()
        .iter()
        .map(|(_, t)| TurretView {
            id: t.id,
            position: t.position,
            range: t.range,
            cooldown_timer: t.cooldown_timer,
            cooldown_max: t.cooldown_max,
        })
        .collect();
    turrets.sort_by_key(|t| t.id);
    turrets
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    let mut obstacles: Vec<ObstacleView> = world
        .query::<&Obstacle>()
        .iter()
        .map(|(_, o)| ObstacleView {
            id: o.id,
            position: o.position,
            radius: o.radius,
        })
        .collect();
    obstacles.sort_by_key(|o| o.id);
    obstacles
}

fn build_rockets(world: &World) -> Vec<RocketView> {
    let mut rockets: Vec<RocketView> = world
        .query::<&Rocket>()
        .iter()
        .filter(|(_, r)| r.alive)
        .map(|(_, r)| RocketView {
            id: r.id,
            position: r.position,
            velocity: r.velocity,
            fuel: r.fuel,
            target_drone: r.target_drone,
            blast_radius: r.blast_radius,
        })
        .collect();
    rockets.sort_by_key(|r| r.id);
    rockets
}
