//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components and the engine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod assignment;
pub mod cleanup;
pub mod drones;
pub mod enemies;
pub mod launch;
pub mod lifecycle;
pub mod rockets;
pub mod snapshot;
pub mod turret;

/// Private random stream for one drone in one tick.
///
/// Seeded from the engine's per-tick draw and the drone id, so forces come
/// out the same whether drones are evaluated serially or on the rayon pool.
pub fn drone_rng(tick_seed: u64, drone_id: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(tick_seed ^ u64::from(drone_id).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
