//! Rocket system: advances every rocket in flight and applies blasts.

use hecs::{Entity, World};
use tracing::debug;

use swarm_core::components::{Drone, Obstacle, Rocket};
use swarm_core::events::{EventLog, KillCause, SimEvent};
use swarm_core::state::CombatTally;

use crate::guidance::{self, Quarry, RocketOutcome};
use crate::systems::lifecycle;

/// Advance all alive rockets in id order.
pub fn run(world: &mut World, obstacles: &[Obstacle], events: &mut EventLog, tally: &mut CombatTally) {
    let mut rockets: Vec<(Entity, Rocket)> = world
        .query::<&Rocket>()
        .iter()
        .filter(|(_, r)| r.alive)
        .map(|(entity, r)| (entity, *r))
        .collect();
    rockets.sort_by_key(|(_, r)| r.id);

    for (entity, mut rocket) in rockets {
        let quarry = find_quarry(world, rocket.target_drone);
        match guidance::advance(&mut rocket, quarry, obstacles) {
            RocketOutcome::Flying => {}
            RocketOutcome::Detonated => {
                let casualties = detonate(world, &rocket, events);
                tally.rocket_detonations += 1;
                tally.rocket_kills += casualties.len() as u32;
                debug!(rocket = rocket.id, casualties = casualties.len(), "rocket detonated");
                events.push(SimEvent::RocketDetonated {
                    rocket: rocket.id,
                    position: rocket.position,
                    casualties,
                });
            }
            RocketOutcome::Lost(reason) => {
                debug!(rocket = rocket.id, ?reason, "rocket lost");
                events.push(SimEvent::RocketLost {
                    rocket: rocket.id,
                    reason,
                });
            }
        }

        if let Ok(mut stored) = world.get::<&mut Rocket>(entity) {
            *stored = rocket;
        }
    }
}

fn find_quarry(world: &World, drone_id: u32) -> Option<Quarry> {
    world
        .query::<&Drone>()
        .iter()
        .find(|(_, d)| d.id == drone_id)
        .map(|(_, d)| Quarry::from(d))
}

/// Destroy every alive drone inside the blast. Returns their ids.
fn detonate(world: &World, rocket: &Rocket, events: &mut EventLog) -> Vec<u32> {
    let drones: Vec<(Entity, Drone)> = world
        .query::<&Drone>()
        .iter()
        .map(|(entity, d)| (entity, *d))
        .collect();
    let hit = guidance::blast_casualties(rocket.position, rocket.blast_radius, drones.iter().map(|(_, d)| d));
    let mut in_blast: Vec<(u32, Entity)> = drones
        .iter()
        .filter(|(_, d)| hit.contains(&d.id))
        .map(|(entity, d)| (d.id, *entity))
        .collect();
    in_blast.sort_unstable_by_key(|(id, _)| *id);

    let mut casualties = Vec::with_capacity(in_blast.len());
    for (id, entity) in in_blast {
        if lifecycle::destroy_drone(world, entity, KillCause::Rocket { rocket: rocket.id }, events) {
            casualties.push(id);
        }
    }
    casualties
}
