//! Per-tick capture of the world that every behavior reads from.

use hecs::World;
use swarm_core::components::{Drone, Obstacle, Target, Turret};
use swarm_core::config::EnvironmentConfig;
use swarm_core::types::Field;
use swarm_tactics::context::Surroundings;
use swarm_terrain::TerrainProvider;

/// Copies of every drone, target, obstacle and turret, sorted by id.
///
/// Friendly drones carry their environment-scaled traits for this tick only;
/// the scaled values are never written back to the world.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub drones: Vec<Drone>,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    pub turrets: Vec<Turret>,
}

impl Frame {
    pub fn capture(world: &World, environment: &EnvironmentConfig) -> Self {
        let perception = environment.perception_scale();
        let speed = environment.speed_scale();

        let mut drones: Vec<Drone> = world
            .query::<&Drone>()
            .iter()
            .map(|(_, d)| {
                let mut d = *d;
                if d.is_friendly() {
                    d.traits.perception_range *= perception;
                    d.traits.max_speed *= speed;
                }
                d
            })
            .collect();
        drones.sort_by_key(|d| d.id);

        let mut targets: Vec<Target> = world.query::<&Target>().iter().map(|(_, t)| *t).collect();
        targets.sort_by_key(|t| t.id);

        let mut obstacles: Vec<Obstacle> =
            world.query::<&Obstacle>().iter().map(|(_, o)| *o).collect();
        obstacles.sort_by_key(|o| o.id);

        let mut turrets: Vec<Turret> = world.query::<&Turret>().iter().map(|(_, t)| *t).collect();
        turrets.sort_by_key(|t| t.id);

        Self {
            drones,
            targets,
            obstacles,
            turrets,
        }
    }

    pub fn surroundings<'a>(&'a self, terrain: &'a dyn TerrainProvider, field: Field) -> Surroundings<'a> {
        Surroundings {
            drones: &self.drones,
            targets: &self.targets,
            obstacles: &self.obstacles,
            turrets: &self.turrets,
            terrain,
            field,
        }
    }
}
