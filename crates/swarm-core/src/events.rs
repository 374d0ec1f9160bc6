//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::RocketLoss;
use crate::types::Vec2;

/// What killed a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Turret { turret: u32 },
    Melee { enemy: u32 },
    Rocket { rocket: u32 },
}

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A turret shot at a drone. `hit` is false when the resolution roll failed.
    TurretFired { turret: u32, drone: u32, hit: bool },
    DroneDestroyed {
        drone: u32,
        position: Vec2,
        cause: KillCause,
    },
    DroneOutOfFuel { drone: u32 },
    TargetDestroyed { target: u32, by: u32 },
    TargetAssigned { drone: u32, target: u32 },
    /// A witness raised its avoidance factor for a turret.
    ThreatLearned {
        drone: u32,
        turret: u32,
        factor: f64,
    },
    RocketLaunched {
        rocket: u32,
        turret: u32,
        target_drone: u32,
    },
    RocketDetonated {
        rocket: u32,
        position: Vec2,
        casualties: Vec<u32>,
    },
    RocketLost { rocket: u32, reason: RocketLoss },
}

/// Collects events over a tick.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
