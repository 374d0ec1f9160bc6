//! Read-only views of the world for presentation layers, plus run statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{SimTime, Vec2};

/// Everything a renderer needs after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldView {
    pub time: SimTime,
    pub field_size: f64,
    pub drones: Vec<DroneView>,
    pub targets: Vec<TargetView>,
    pub turrets: Vec<TurretView>,
    pub obstacles: Vec<ObstacleView>,
    pub rockets: Vec<RocketView>,
    pub statistics: Statistics,
}

/// A drone of either faction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub id: u32,
    pub faction: Faction,
    pub position: Vec2,
    pub velocity: Vec2,
    pub fuel: f64,
    pub alive: bool,
    pub status: DroneStatus,
    /// Assigned target (friendly) or hunted prey (enemy).
    pub target: Option<u32>,
    pub pattern: Option<AttackPattern>,
    pub role: Option<OperationalRole>,
    /// Recent positions for trail dots.
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub position: Vec2,
    pub alive: bool,
    pub assigned_drones: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: u32,
    pub position: Vec2,
    pub range: f64,
    pub cooldown_timer: u32,
    pub cooldown_max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub position: Vec2,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketView {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub fuel: u32,
    pub target_drone: u32,
    pub blast_radius: f64,
}

/// Aggregate counters for a run.
///
/// Drone counts cover friendly drones only; enemies are counted separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub step_count: u64,
    pub drones_alive: u32,
    /// Alive and still carrying fuel.
    pub drones_active: u32,
    pub targets_remaining: u32,
    pub targets_destroyed: u32,
    /// Friendly drones per status. Every status is present, possibly at zero.
    pub status_counts: BTreeMap<DroneStatus, u32>,
    pub enemies_alive: u32,
    pub rockets_in_flight: u32,
    pub turret_kills: u32,
    pub melee_kills: u32,
    pub rocket_kills: u32,
    pub rocket_detonations: u32,
}

impl Statistics {
    pub fn count(&self, status: DroneStatus) -> u32 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

/// Cumulative combat counters carried across ticks and snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTally {
    pub turret_kills: u32,
    pub melee_kills: u32,
    pub rocket_kills: u32,
    pub rocket_detonations: u32,
}
