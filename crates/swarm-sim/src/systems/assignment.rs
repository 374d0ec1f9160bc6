//! Target assignment: greedy, capacity-limited matching of idle drones to
//! alive targets.

use hecs::{Entity, World};
use tracing::debug;

use swarm_core::components::{Drone, Target};
use swarm_core::config::AssignmentConfig;
use swarm_core::enums::DroneStatus;
use swarm_core::events::{EventLog, SimEvent};
use swarm_core::types::Vec2;

/// Give every active friendly without a target the best-scoring open target.
/// Drones are served in id order.
pub fn run(world: &mut World, acfg: &AssignmentConfig, events: &mut EventLog) {
    let mut targets: Vec<(Entity, Target)> = world
        .query::<&Target>()
        .iter()
        .map(|(entity, t)| (entity, *t))
        .collect();
    targets.sort_by_key(|(_, t)| t.id);

    let mut idle: Vec<(Entity, Drone)> = world
        .query::<&Drone>()
        .iter()
        .filter(|(_, d)| d.is_friendly() && d.is_active() && d.target.is_none())
        .map(|(entity, d)| (entity, *d))
        .collect();
    idle.sort_by_key(|(_, d)| d.id);

    if idle.is_empty() {
        return;
    }

    for (entity, mut drone) in idle {
        let Some(index) = best_target(drone.position, targets.iter().map(|(_, t)| t), acfg) else {
            continue;
        };
        let target = &mut targets[index].1;
        target.assigned_drones += 1;
        drone.target = Some(target.id);
        drone.status = DroneStatus::Moving;

        debug!(drone = drone.id, target = target.id, "target assigned");
        events.push(SimEvent::TargetAssigned {
            drone: drone.id,
            target: target.id,
        });
        if let Ok(mut stored) = world.get::<&mut Drone>(entity) {
            *stored = drone;
        }
    }

    for (entity, target) in targets {
        if let Ok(mut stored) = world.get::<&mut Target>(entity) {
            *stored = target;
        }
    }
}

/// Index of the alive, non-full target with the lowest
/// `distance + penalty * assigned_drones`. Ties go to the earlier target.
pub fn best_target<'a>(
    from: Vec2,
    targets: impl IntoIterator<Item = &'a Target>,
    acfg: &AssignmentConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, target) in targets.into_iter().enumerate() {
        if !target.alive || target.assigned_drones >= acfg.limit {
            continue;
        }
        let score = from.distance(target.position) + acfg.congestion_penalty * target.assigned_drones as f64;
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
