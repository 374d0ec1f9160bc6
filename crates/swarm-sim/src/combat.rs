//! Kill resolution shared by turret fire and enemy melee.

use rand::Rng;
use swarm_core::enums::ResolutionStrategy;

/// Roll one kill attempt. `Deterministic` never consumes randomness.
pub fn attempt_kill(strategy: ResolutionStrategy, rng: &mut impl Rng) -> bool {
    match strategy {
        ResolutionStrategy::Deterministic => true,
        ResolutionStrategy::Probabilistic { probability } => rng.gen_bool(probability.clamp(0.0, 1.0)),
    }
}
