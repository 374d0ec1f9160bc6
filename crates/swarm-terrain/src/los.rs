//! Line-of-sight calculation with terrain occlusion.
//!
//! Stepped ray traversal: the straight segment between two eye points is
//! sampled and compared against ground elevation at each step.

use swarm_core::types::Vec2;

use crate::grid::HeightmapTerrain;
use crate::provider::TerrainProvider;

/// Minimum number of samples along any ray.
const MIN_LOS_SAMPLES: usize = 10;

/// Check line-of-sight between two field points over a heightmap.
///
/// The observer's eye is `observer_height` above the ground at `from`, the
/// target point is `target_height` above the ground at `to`. Returns false
/// as soon as any interior sample has ground above the ray.
pub fn has_line_of_sight(
    grid: &HeightmapTerrain,
    from: Vec2,
    to: Vec2,
    observer_height: f64,
    target_height: f64,
) -> bool {
    let delta = to - from;
    let dist = delta.length();
    let spacing = grid.sample_spacing();

    if dist < spacing {
        return true; // Too close for terrain to matter
    }

    let num_samples = ((dist / spacing).ceil() as usize).max(MIN_LOS_SAMPLES);

    let eye = grid.elevation(from) + observer_height;
    let aim = grid.elevation(to) + target_height;

    for i in 1..num_samples {
        let t = i as f64 / num_samples as f64;
        let ray_height = eye + (aim - eye) * t;
        let ground = grid.elevation(from + delta * t);
        if ground > ray_height {
            return false; // Terrain blocks LOS
        }
    }

    true
}
