//! Simulation engine for the drone swarm.
//!
//! Owns the hecs ECS world and the seeded RNG, runs the systems once per
//! tick, and produces read-only views, statistics and events for the
//! presentation layers.

pub mod combat;
pub mod engine;
pub mod error;
pub mod frame;
pub mod guidance;
pub mod persistence;
pub mod systems;
pub mod world_setup;

pub use engine::SwarmEngine;
pub use error::SimError;
pub use persistence::WorldSnapshot;
pub use swarm_core as core;
pub use world_setup::ScenarioBuilder;
