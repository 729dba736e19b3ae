//! Line-of-sight calculation with terrain occlusion.
//!
//! Uses stepped ray traversal with Earth curvature correction
//! and standard atmospheric refraction (4/3 Earth radius model).

use deterrence_core::types::Position;

use crate::grid::TerrainGrid;

/// Effective Earth radius accounting for standard atmospheric refraction (4/3 model).
const EFFECTIVE_EARTH_RADIUS: f64 = 6_371_000.0 * 4.0 / 3.0;

/// Default sample interval for LOS checks (meters).
const LOS_SAMPLE_INTERVAL: f64 = 100.0;

/// Check line-of-sight between two sim-space points, accounting for terrain and Earth curvature.
///
/// Returns true if there is clear LOS between `from` and `to`.
/// The check steps along the straight-line path and compares the LOS ray height
/// against terrain elevation at each step. Earth curvature causes the ground to
/// "drop away" from the straight-line ray.
pub fn has_line_of_sight(grid: &TerrainGrid, from: &Position, to: &Position) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dz = to.z - from.z;
    let horiz_dist = (dx * dx + dy * dy).sqrt();

    if horiz_dist < LOS_SAMPLE_INTERVAL {
        return true; // Too close for terrain to matter
    }

    let num_samples = (horiz_dist / LOS_SAMPLE_INTERVAL).ceil() as usize;
    let num_samples = num_samples.max(2);

    for i in 1..num_samples {
        let t = i as f64 / num_samples as f64;

        // Position along the straight-line ray
        let sample_x = from.x + dx * t;
        let sample_y = from.y + dy * t;

        // Height of the LOS ray at this point (linear interpolation in height)
        let ray_height = from.z + dz * t;

        // Earth curvature correction: ground drops away from the ray
        let d_from = horiz_dist * t;
        let d_to = horiz_dist * (1.0 - t);
        // Curvature drop relative to the straight-line ray between the two endpoints
        let earth_drop = (d_from * d_to) / (2.0 * EFFECTIVE_EARTH_RADIUS);

        // Query terrain elevation at this sample point
        let sample_pos = Position::new(sample_x, sample_y, 0.0);
        let terrain_elev = grid.elevation_at(&sample_pos).unwrap_or(0.0) as f64;

        // The effective terrain height relative to the LOS ray
        // Earth curvature causes the terrain to be lower than it would be on a flat earth
        let effective_terrain = terrain_elev - earth_drop;

        if effective_terrain > ray_height {
            return false; // Terrain blocks LOS
        }
    }

    true
}
