//! Tactical behavior for the drone swarm simulation.
//!
//! Pure functions that compute steering forces and tactical decisions for
//! friendly and enemy drones from a read-only view of the world. No ECS
//! dependency: callers pass plain component data and a random source.

pub mod advanced;
pub mod context;
pub mod patterns;
pub mod profiles;
pub mod roles;
pub mod steering;

pub use swarm_core as core;

#[cfg(test)]
mod tests;
