//! Role- and pattern-specific behavioral profiles.
//!
//! Multipliers applied once, at spawn, to a drone's base traits.

use swarm_core::components::DroneTraits;
use swarm_core::config::SwarmConfig;
use swarm_core::enums::{AttackPattern, OperationalRole};

/// Trait multipliers for one role or attack pattern. 1.0 leaves a trait as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitProfile {
    pub max_speed: f64,
    pub perception_range: f64,
    pub attack_range: f64,
    pub attack_strength: f64,
    pub avoidance_strength: f64,
    pub cohesion_strength: f64,
    pub alignment_strength: f64,
    pub separation_strength: f64,
}

const NEUTRAL: TraitProfile = TraitProfile {
    max_speed: 1.0,
    perception_range: 1.0,
    attack_range: 1.0,
    attack_strength: 1.0,
    avoidance_strength: 1.0,
    cohesion_strength: 1.0,
    alignment_strength: 1.0,
    separation_strength: 1.0,
};

/// Get the profile for an operational role.
pub fn role_profile(role: OperationalRole) -> TraitProfile {
    match role {
        OperationalRole::Scout => TraitProfile {
            perception_range: 1.5,
            max_speed: 1.2,
            ..NEUTRAL
        },
        OperationalRole::Attacker => TraitProfile {
            attack_strength: 1.3,
            attack_range: 1.2,
            ..NEUTRAL
        },
        OperationalRole::Defender => TraitProfile {
            perception_range: 1.2,
            avoidance_strength: 1.5,
            ..NEUTRAL
        },
        OperationalRole::Support => TraitProfile {
            cohesion_strength: 2.0,
            alignment_strength: 1.5,
            ..NEUTRAL
        },
    }
}

/// Get the profile for an enemy attack pattern.
pub fn pattern_profile(pattern: AttackPattern) -> TraitProfile {
    match pattern {
        AttackPattern::Direct => TraitProfile {
            max_speed: 1.2,
            attack_strength: 1.3,
            ..NEUTRAL
        },
        AttackPattern::Flanking => TraitProfile {
            perception_range: 1.3,
            separation_strength: 1.5,
            ..NEUTRAL
        },
        AttackPattern::Ambush => TraitProfile {
            attack_range: 1.5,
            cohesion_strength: 0.5,
            ..NEUTRAL
        },
        AttackPattern::Swarm => TraitProfile {
            cohesion_strength: 2.0,
            alignment_strength: 2.0,
            ..NEUTRAL
        },
    }
}

impl TraitProfile {
    pub fn apply(&self, base: DroneTraits) -> DroneTraits {
        DroneTraits {
            max_speed: base.max_speed * self.max_speed,
            perception_range: base.perception_range * self.perception_range,
            attack_range: base.attack_range * self.attack_range,
            attack_strength: base.attack_strength * self.attack_strength,
            avoidance_strength: base.avoidance_strength * self.avoidance_strength,
            cohesion_strength: base.cohesion_strength * self.cohesion_strength,
            alignment_strength: base.alignment_strength * self.alignment_strength,
            separation_strength: base.separation_strength * self.separation_strength,
        }
    }
}

/// Unmodified traits from the drone section of the config.
pub fn base_traits(cfg: &SwarmConfig) -> DroneTraits {
    DroneTraits {
        max_speed: cfg.drone.max_speed,
        perception_range: cfg.drone.sensor_range,
        attack_range: cfg.drone.attack_range,
        attack_strength: 1.0,
        avoidance_strength: 1.0,
        cohesion_strength: 1.0,
        alignment_strength: 1.0,
        separation_strength: 1.0,
    }
}
