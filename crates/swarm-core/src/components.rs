//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems and in the
//! tactics crate, not here. Cross-references between entities are stable ids,
//! never entity handles.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::memory::ThreatMemory;
use crate::types::Vec2;

/// Static obstacle. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec2,
    pub radius: f64,
}

/// Ground objective for the friendly swarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub position: Vec2,
    /// Goes false exactly once.
    pub alive: bool,
    /// Live drones currently holding this target.
    pub assigned_drones: u32,
}

/// Point-defense turret.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub id: u32,
    pub position: Vec2,
    /// Detection and engagement range.
    pub range: f64,
    /// Ticks until the turret may fire again. Always within `0..=cooldown_max`.
    pub cooldown_timer: u32,
    pub cooldown_max: u32,
}

impl Turret {
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer == 0
    }

    /// Strictly inside detection range.
    pub fn detects(&self, position: Vec2) -> bool {
        self.position.distance_squared(position) < self.range * self.range
    }
}

/// Per-drone flight and behavior parameters, resolved at spawn from the
/// config and any role or attack-pattern modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneTraits {
    pub max_speed: f64,
    /// Flocking neighbor radius.
    pub perception_range: f64,
    pub attack_range: f64,
    /// Multiplier on target seeking.
    pub attack_strength: f64,
    /// Multiplier on obstacle and turret avoidance.
    pub avoidance_strength: f64,
    pub cohesion_strength: f64,
    pub alignment_strength: f64,
    pub separation_strength: f64,
}

/// A drone of either faction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: u32,
    pub faction: Faction,
    pub position: Vec2,
    pub velocity: Vec2,
    pub fuel: f64,
    pub alive: bool,
    pub status: DroneStatus,
    /// Assigned target id (friendly drones only).
    pub target: Option<u32>,
    pub traits: DroneTraits,
}

impl Drone {
    /// Alive and able to move.
    pub fn is_active(&self) -> bool {
        self.alive && self.status != DroneStatus::NoFuel
    }

    pub fn is_friendly(&self) -> bool {
        self.faction == Faction::Friendly
    }
}

/// Recent positions for trail rendering. Not used by the simulation itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: VecDeque<Vec2>,
    pub capacity: usize,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }
}

/// Hunting state of an enemy drone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub pattern: AttackPattern,
    /// Friendly drone currently hunted.
    pub prey: Option<u32>,
    /// Chosen hide point while the ambush is being set up.
    pub ambush_point: Option<Vec2>,
}

impl EnemyBrain {
    pub fn new(pattern: AttackPattern) -> Self {
        Self {
            pattern,
            prey: None,
            ambush_point: None,
        }
    }
}

/// State of the advanced evasion/formation layer on a friendly drone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAi {
    /// Ticks until another random evasive impulse is allowed.
    pub evasion_cooldown: u32,
    pub memory: ThreatMemory,
}

/// Operational role of an enhanced friendly drone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleBrain {
    pub role: OperationalRole,
}

/// Guided anti-drone rocket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: u32,
    /// Turret that launched it.
    pub launcher: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
    /// Ticks of flight left.
    pub fuel: u32,
    /// Drone id it homes on.
    pub target_drone: u32,
    pub speed: f64,
    pub blast_radius: f64,
    pub lookahead: f64,
}
