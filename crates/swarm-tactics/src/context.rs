//! Read-only view of the world handed to every behavior function.

use std::f64::consts::TAU;

use rand::Rng;
use swarm_core::components::{Drone, Obstacle, Target, Turret};
use swarm_core::enums::Faction;
use swarm_core::types::{unit_at, Field, Vec2};
use swarm_terrain::TerrainProvider;

/// Snapshot of the world at the start of a tick.
///
/// Every slice is sorted by id, so scans are deterministic.
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    /// Drones of both factions, dead ones included.
    pub drones: &'a [Drone],
    pub targets: &'a [Target],
    pub obstacles: &'a [Obstacle],
    pub turrets: &'a [Turret],
    pub terrain: &'a dyn TerrainProvider,
    pub field: Field,
}

impl<'a> Surroundings<'a> {
    pub fn drone(&self, id: u32) -> Option<&'a Drone> {
        self.drones
            .binary_search_by_key(&id, |d| d.id)
            .ok()
            .map(|i| &self.drones[i])
    }

    pub fn target(&self, id: u32) -> Option<&'a Target> {
        self.targets
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|i| &self.targets[i])
    }

    /// Alive drones of the given faction.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &'a Drone> + 'a {
        self.drones
            .iter()
            .filter(move |d| d.alive && d.faction == faction)
    }

    /// Nearest alive friendly drone to `from`. Ties go to the lower id.
    pub fn nearest_friendly(&self, from: Vec2) -> Option<&'a Drone> {
        let mut best: Option<(&Drone, f64)> = None;
        for d in self.living(Faction::Friendly) {
            let d2 = d.position.distance_squared(from);
            if best.map_or(true, |(_, b)| d2 < b) {
                best = Some((d, d2));
            }
        }
        best.map(|(d, _)| d)
    }
}

/// Uniformly random unit vector. Used to break ties on coincident points.
pub fn random_unit(rng: &mut impl Rng) -> Vec2 {
    unit_at(rng.gen_range(0.0..TAU))
}
