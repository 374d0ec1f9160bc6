//! Synthetic heightmap generator.
//!
//! Three cosine layers at increasing frequency with seeded phases, uniform
//! texture noise, then normalization to `[0, max_elevation]`.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::grid::HeightmapTerrain;

/// (frequency, amplitude) of each cosine layer, in cycles over the unit square.
const LAYERS: [(f64, f64); 3] = [(5.0, 100.0), (10.0, 50.0), (20.0, 25.0)];

/// Half-width of the uniform texture noise, before normalization.
const NOISE_AMPLITUDE: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct SyntheticTerrainParams {
    pub seed: u64,
    /// Grid nodes per side.
    pub resolution: usize,
    pub field_size: f64,
    pub meters_per_unit: f64,
    pub max_elevation: f64,
}

impl Default for SyntheticTerrainParams {
    fn default() -> Self {
        Self {
            seed: 42,
            resolution: 100,
            field_size: 100.0,
            meters_per_unit: 100.0,
            max_elevation: 1000.0,
        }
    }
}

/// Build a deterministic heightmap from `params`.
pub fn generate_heightmap(params: &SyntheticTerrainParams) -> std::io::Result<HeightmapTerrain> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let n = params.resolution.max(2);

    let phases: Vec<(f64, f64)> = LAYERS
        .iter()
        .map(|_| (rng.gen::<f64>() * TAU, rng.gen::<f64>() * TAU))
        .collect();

    let mut elevations = Vec::with_capacity(n * n);
    for row in 0..n {
        let y = row as f64 / (n - 1) as f64;
        for col in 0..n {
            let x = col as f64 / (n - 1) as f64;
            let mut z = 0.0;
            for ((freq, amp), (px, py)) in LAYERS.iter().zip(&phases) {
                z += amp * (freq * x + px).cos() * (freq * y + py).cos();
            }
            z += rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
            elevations.push(z);
        }
    }

    let (lo, hi) = elevations
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
            (lo.min(e), hi.max(e))
        });
    let span = hi - lo;
    for e in &mut elevations {
        *e = if span > 0.0 {
            (*e - lo) / span * params.max_elevation
        } else {
            0.0
        };
    }

    debug!(seed = params.seed, resolution = n, "generated synthetic terrain");
    HeightmapTerrain::new(n, n, params.field_size, params.meters_per_unit, elevations)
}
