//! HeightmapTerrain: regular elevation grid stretched over the field.

use std::io;

use swarm_core::types::Vec2;

use crate::los::has_line_of_sight;
use crate::provider::TerrainProvider;

/// Horizontal distance (field units) used for finite-difference slope.
const SLOPE_SAMPLE_FRACTION: f64 = 0.01;

/// Eye height of a drone above ground (meters).
const OBSERVER_HEIGHT: f64 = 10.0;

/// Heightmap covering `[0, field_size]²`.
///
/// Grid node `(row, col)` sits at field position
/// `(col, row) * field_size / (n - 1)`; row 0 is the `y = 0` edge.
#[derive(Debug, Clone)]
pub struct HeightmapTerrain {
    /// Number of columns (along x).
    pub width: usize,
    /// Number of rows (along y).
    pub height: usize,
    pub field_size: f64,
    /// Meters of ground per field unit. Converts elevation deltas into slope.
    pub meters_per_unit: f64,
    /// Elevation values in meters, row-major.
    elevations: Vec<f64>,
}

impl HeightmapTerrain {
    pub fn new(
        width: usize,
        height: usize,
        field_size: f64,
        meters_per_unit: f64,
        elevations: Vec<f64>,
    ) -> io::Result<Self> {
        if width < 2 || height < 2 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("heightmap must be at least 2x2, got {width}x{height}"),
            ));
        }
        if elevations.len() != width * height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "heightmap has {} samples, expected {}",
                    elevations.len(),
                    width * height
                ),
            ));
        }
        if !(field_size > 0.0 && meters_per_unit > 0.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "field size and horizontal scale must be positive",
            ));
        }
        Ok(Self {
            width,
            height,
            field_size,
            meters_per_unit,
            elevations,
        })
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// (min, max) elevation in the grid.
    pub fn elevation_range(&self) -> (f64, f64) {
        self.elevations
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
                (lo.min(e), hi.max(e))
            })
    }

    /// Field position to fractional (row, col), clamped onto the grid.
    fn field_to_grid(&self, at: Vec2) -> (f64, f64) {
        let col = (at.x / self.field_size) * (self.width - 1) as f64;
        let row = (at.y / self.field_size) * (self.height - 1) as f64;
        (
            row.clamp(0.0, (self.height - 1) as f64),
            col.clamp(0.0, (self.width - 1) as f64),
        )
    }

    fn raw_elevation(&self, row: usize, col: usize) -> f64 {
        if row >= self.height || col >= self.width {
            return 0.0;
        }
        self.elevations[row * self.width + col]
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.height - 1);
        let c1 = (c0 + 1).min(self.width - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let e00 = self.raw_elevation(r0, c0);
        let e01 = self.raw_elevation(r0, c1);
        let e10 = self.raw_elevation(r1, c0);
        let e11 = self.raw_elevation(r1, c1);

        let top = e00 * (1.0 - fc) + e01 * fc;
        let bot = e10 * (1.0 - fc) + e11 * fc;
        top * (1.0 - fr) + bot * fr
    }

    /// Spacing between line-of-sight samples (field units).
    pub fn sample_spacing(&self) -> f64 {
        self.field_size / (self.width.max(self.height) - 1) as f64
    }
}

impl TerrainProvider for HeightmapTerrain {
    fn elevation(&self, at: Vec2) -> f64 {
        let (row, col) = self.field_to_grid(at);
        self.bilinear(row, col)
    }

    fn slope(&self, at: Vec2) -> f64 {
        let step = self.field_size * SLOPE_SAMPLE_FRACTION;
        let center = self.elevation(at);
        let east = self.elevation(at + Vec2::new(step, 0.0));
        let north = self.elevation(at + Vec2::new(0.0, step));

        let run = step * self.meters_per_unit;
        let dx = (east - center) / run;
        let dy = (north - center) / run;
        (dx * dx + dy * dy).sqrt().atan().to_degrees()
    }

    fn line_of_sight_clear(&self, a: Vec2, b: Vec2) -> bool {
        has_line_of_sight(self, a, b, OBSERVER_HEIGHT, 0.0)
    }
}
