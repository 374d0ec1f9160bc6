//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side a drone fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Swarm drones that attack ground targets.
    #[default]
    Friendly,
    /// Hunter drones that attack the swarm.
    Enemy,
}

/// Drone behavior state.
///
/// `NoFuel` and `Destroyed` are terminal: once entered, the drone never moves again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    /// No target assigned.
    #[default]
    Idle,
    /// Flying toward an assigned target.
    Moving,
    /// Destroyed its target this tick.
    Attacking,
    /// Strongly repelled by a turret this tick.
    Avoiding,
    /// Fuel ratio below the low-fuel threshold.
    LowFuel,
    /// Out of fuel. Alive but inert.
    NoFuel,
    /// Killed by a turret, enemy, or rocket.
    Destroyed,
    /// Enemy drone pursuing prey.
    Hunting,
}

impl DroneStatus {
    pub const ALL: [DroneStatus; 8] = [
        DroneStatus::Idle,
        DroneStatus::Moving,
        DroneStatus::Attacking,
        DroneStatus::Avoiding,
        DroneStatus::LowFuel,
        DroneStatus::NoFuel,
        DroneStatus::Destroyed,
        DroneStatus::Hunting,
    ];

    /// True for states from which a drone never moves again.
    pub fn is_terminal(self) -> bool {
        matches!(self, DroneStatus::NoFuel | DroneStatus::Destroyed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Moving => "Moving",
            Self::Attacking => "Attacking",
            Self::Avoiding => "Avoiding",
            Self::LowFuel => "LowFuel",
            Self::NoFuel => "NoFuel",
            Self::Destroyed => "Destroyed",
            Self::Hunting => "Hunting",
        }
    }
}

/// Tactical pattern an enemy drone follows when closing on prey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Charge straight at the nearest prey.
    #[default]
    Direct,
    /// Approach from the side of the prey's heading.
    Flanking,
    /// Hide behind an obstacle near the prey and wait.
    Ambush,
    /// Take a slot on a ring around shared prey.
    Swarm,
}

impl AttackPattern {
    pub const ALL: [AttackPattern; 4] = [
        AttackPattern::Direct,
        AttackPattern::Flanking,
        AttackPattern::Ambush,
        AttackPattern::Swarm,
    ];
}

/// Specialization of an enhanced friendly drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationalRole {
    /// Explores the least-visited parts of the field.
    Scout,
    /// Picks low-risk approach headings toward its target.
    Attacker,
    /// Interposes itself between turrets and threatened allies.
    Defender,
    /// Fills gaps in the swarm formation.
    Support,
}

impl OperationalRole {
    pub const ALL: [OperationalRole; 4] = [
        OperationalRole::Scout,
        OperationalRole::Attacker,
        OperationalRole::Defender,
        OperationalRole::Support,
    ];
}

/// Rule deciding whether a kill attempt succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Every attempt kills.
    #[default]
    Deterministic,
    /// Each attempt kills with the given probability.
    Probabilistic { probability: f64 },
}

/// Time of day. Reduces visibility after sunset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Day,
    Dusk,
    Night,
}

/// Weather condition. Reduces visibility and, in rain or fog, flight speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Fog,
}

/// Why a rocket left play without detonating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketLoss {
    /// Its target died before impact.
    TargetLost,
    /// Flew into an obstacle.
    ObstacleCollision,
    /// Burned all fuel.
    FuelExhausted,
}
