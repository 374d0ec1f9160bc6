//! Cleanup system: removes rockets that are no longer in flight.
//!
//! Drones and targets stay in the world after they die so statistics and
//! views can report them.

use hecs::{Entity, World};

use swarm_core::components::Rocket;

/// Despawn inert rockets. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, rocket) in world.query_mut::<&Rocket>() {
        if !rocket.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
