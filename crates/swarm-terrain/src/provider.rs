//! Terrain query interface consumed by steering and tactics.

use swarm_core::types::Vec2;

/// Terrain queries in field coordinates.
///
/// Implementations must be pure: the same query always returns the same
/// answer, so force computation can run in parallel over a shared provider.
pub trait TerrainProvider: Send + Sync {
    /// Ground elevation (meters).
    fn elevation(&self, at: Vec2) -> f64;

    /// Ground slope (degrees, 0 = flat).
    fn slope(&self, at: Vec2) -> f64;

    /// True if terrain does not block the straight line from `a` to `b`.
    fn line_of_sight_clear(&self, a: Vec2, b: Vec2) -> bool;
}

/// Flat, always-visible ground. Used when no terrain is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain;

impl TerrainProvider for FlatTerrain {
    fn elevation(&self, _at: Vec2) -> f64 {
        0.0
    }

    fn slope(&self, _at: Vec2) -> f64 {
        0.0
    }

    fn line_of_sight_clear(&self, _a: Vec2, _b: Vec2) -> bool {
        true
    }
}
