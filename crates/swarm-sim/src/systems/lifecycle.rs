//! Shared state transitions: drone kills and target release.
//!
//! Every path that ends a drone or a target goes through here so the
//! target assignment counters stay equal to the number of live holders.

use hecs::{Entity, World};
use tracing::debug;

use swarm_core::components::{Drone, Target};
use swarm_core::enums::DroneStatus;
use swarm_core::events::{EventLog, KillCause, SimEvent};

/// One holder fewer on `target_id`.
pub fn release_target(world: &World, target_id: u32) {
    for (_entity, target) in world.query::<&mut Target>().iter() {
        if target.id == target_id {
            target.assigned_drones = target.assigned_drones.saturating_sub(1);
        }
    }
}

/// Kill a drone and release its target. Returns false if it was already dead.
pub fn destroy_drone(world: &World, entity: Entity, cause: KillCause, events: &mut EventLog) -> bool {
    let released = {
        let Ok(mut drone) = world.get::<&mut Drone>(entity) else {
            return false;
        };
        if !drone.alive {
            return false;
        }
        drone.alive = false;
        drone.status = DroneStatus::Destroyed;
        debug!(drone = drone.id, ?cause, "drone destroyed");
        events.push(SimEvent::DroneDestroyed {
            drone: drone.id,
            position: drone.position,
            cause,
        });
        drone.target.take()
    };
    if let Some(target_id) = released {
        release_target(world, target_id);
    }
    true
}

/// Destroy a target and clear it from every drone holding it.
///
/// Holders other than the attacker fall back to `Idle`. Returns false if
/// the target was already dead or does not exist.
pub fn destroy_target(world: &World, target_id: u32, attacker: u32, events: &mut EventLog) -> bool {
    let mut destroyed = false;
    for (_entity, target) in world.query::<&mut Target>().iter() {
        if target.id == target_id && target.alive {
            target.alive = false;
            target.assigned_drones = 0;
            destroyed = true;
        }
    }
    if !destroyed {
        return false;
    }

    for (_entity, drone) in world.query::<&mut Drone>().iter() {
        if drone.target != Some(target_id) {
            continue;
        }
        drone.target = None;
        if drone.id != attacker && !drone.status.is_terminal() && drone.status != DroneStatus::LowFuel {
            drone.status = DroneStatus::Idle;
        }
    }

    debug!(target = target_id, drone = attacker, "target destroyed");
    events.push(SimEvent::TargetDestroyed {
        target: target_id,
        by: attacker,
    });
    true
}
