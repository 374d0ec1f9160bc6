//! Terrain for the drone swarm simulation.
//!
//! Elevation, slope and line-of-sight queries behind the `TerrainProvider`
//! trait, a flat provider for terrain-free runs, and a heightmap provider
//! with a synthetic generator.

pub use swarm_core as core;

pub mod grid;
pub mod los;
pub mod provider;
pub mod synthetic;

// Re-export key types for convenience.
pub use grid::HeightmapTerrain;
pub use los::has_line_of_sight;
pub use provider::{FlatTerrain, TerrainProvider};
pub use synthetic::{generate_heightmap, SyntheticTerrainParams};
