//! Turret system: cooldown, target selection, fire and threat learning.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use swarm_core::components::{Drone, Turret};
use swarm_core::config::SwarmConfig;
use swarm_core::events::{EventLog, KillCause, SimEvent};
use swarm_core::memory::LearnedAvoidance;
use swarm_core::state::CombatTally;
use swarm_core::types::Vec2;

use crate::combat;
use crate::systems::lifecycle;

/// Run every turret once, in id order.
pub fn run(
    world: &mut World,
    cfg: &SwarmConfig,
    rng: &mut ChaCha8Rng,
    events: &mut EventLog,
    tally: &mut CombatTally,
) {
    let mut turrets: Vec<(Entity, Turret)> = world
        .query::<&Turret>()
        .iter()
        .map(|(entity, t)| (entity, *t))
        .collect();
    turrets.sort_by_key(|(_, t)| t.id);

    for (entity, mut turret) in turrets {
        if turret.cooldown_timer > 0 {
            turret.cooldown_timer -= 1;
        }

        if turret.can_fire() {
            if let Some((victim, victim_id, position)) = nearest_in_range(world, &turret) {
                let hit = combat::attempt_kill(cfg.turret.resolution, rng);
                turret.cooldown_timer = turret.cooldown_max;
                events.push(SimEvent::TurretFired {
                    turret: turret.id,
                    drone: victim_id,
                    hit,
                });

                if hit
                    && lifecycle::destroy_drone(
                        world,
                        victim,
                        KillCause::Turret { turret: turret.id },
                        events,
                    )
                {
                    tally.turret_kills += 1;
                    notify_witnesses(world, cfg, turret.id, victim_id, position, events);
                }
            }
        }

        if let Ok(mut stored) = world.get::<&mut Turret>(entity) {
            *stored = turret;
        }
    }
}

/// Nearest active friendly strictly inside range. Ties go to the lower id.
fn nearest_in_range(world: &World, turret: &Turret) -> Option<(Entity, u32, Vec2)> {
    let mut best: Option<(Entity, u32, Vec2, f64)> = None;
    for (entity, drone) in world.query::<&Drone>().iter() {
        if !drone.is_friendly() || !drone.is_active() || !turret.detects(drone.position) {
            continue;
        }
        let d2 = drone.position.distance_squared(turret.position);
        let better = match best {
            None => true,
            Some((_, id, _, b)) => d2 < b || (d2 == b && drone.id < id),
        };
        if better {
            best = Some((entity, drone.id, drone.position, d2));
        }
    }
    best.map(|(entity, id, position, _)| (entity, id, position))
}

/// Every other alive friendly within half sensor range of the kill learns to
/// avoid this turret harder.
fn notify_witnesses(
    world: &World,
    cfg: &SwarmConfig,
    turret_id: u32,
    victim_id: u32,
    kill_position: Vec2,
    events: &mut EventLog,
) {
    let radius = cfg.drone.sensor_range / 2.0;
    let learning = &cfg.learning;

    let mut witnesses: Vec<(u32, Entity)> = world
        .query::<&Drone>()
        .iter()
        .filter(|(_, d)| {
            d.id != victim_id
                && d.alive
                && d.is_friendly()
                && d.position.distance(kill_position) < radius
        })
        .map(|(entity, d)| (d.id, entity))
        .collect();
    witnesses.sort_unstable_by_key(|(id, _)| *id);

    for (drone_id, entity) in witnesses {
        let Ok(mut learned) = world.get::<&mut LearnedAvoidance>(entity) else {
            continue;
        };
        let factor = learned.register_threat(
            turret_id,
            learning.initial_avoid_factor,
            learning.avoid_increase,
            learning.max_avoid_factor,
        );
        debug!(drone = drone_id, turret = turret_id, factor, "threat learned");
        events.push(SimEvent::ThreatLearned {
            drone: drone_id,
            turret: turret_id,
            factor,
        });
    }
}
