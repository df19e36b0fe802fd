//! Circular placement of per-step widgets.
//!
//! One angle set serves every radius family: the outer widget ring and the
//! inner gate ring share θ_i and differ only in radius and widget size.
//! Positions stay `f64` here; truncation to canvas integers happens at node
//! creation so derived families keep full fractional precision.

use std::f64::consts::TAU;

/// The n evenly spaced ring angles, `θ_i = i · 2π / n`.
///
/// A half-open division of the circle: angle 0 (top of the ring) is
/// included, 2π is not, so no index pair shares an angle. `n = 1`
/// degenerates to the single angle 0.
pub fn ring_angles(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| i as f64 * TAU / n as f64)
}

/// Positions for an n-element ring of square widgets of side `size`
/// centered on `center` at distance `radius`.
///
/// Index i maps to position i, clockwise from the top:
/// `x = cx − size/2 + r·sin θ_i`, `y = cy − size/2 − r·cos θ_i`
/// (the y axis grows downward on the canvas, so the top of the ring is
/// `cy − r`).
pub fn ring_positions(
    n: usize,
    center: (f64, f64),
    radius: f64,
    size: f64,
) -> Vec<(f64, f64)> {
    let (cx, cy) = center;
    ring_angles(n)
        .map(|theta| {
            (
                cx - size / 2.0 + radius * theta.sin(),
                cy - size / 2.0 - radius * theta.cos(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn angles_match_exact_fractions() {
        for n in [1, 2, 3, 4, 7, 16, 64] {
            let angles: Vec<f64> = ring_angles(n).collect();
            assert_eq!(angles.len(), n);
            for (i, angle) in angles.iter().enumerate() {
                let expected = i as f64 * TAU / n as f64;
                assert!((angle - expected).abs() < TOL, "n={n} i={i}");
            }
        }
    }

    #[test]
    fn angles_strictly_increase_without_endpoint() {
        let angles: Vec<f64> = ring_angles(12).collect();
        for pair in angles.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(*angles.last().unwrap() < TAU);
    }

    #[test]
    fn single_step_sits_at_the_top() {
        let pos = ring_positions(1, (200.0, 200.0), 170.0, 30.0);
        assert_eq!(pos.len(), 1);
        let (x, y) = pos[0];
        assert!((x - 185.0).abs() < TOL); // cx - size/2
        assert!((y - 15.0).abs() < TOL); // cy - size/2 - r
    }

    #[test]
    fn four_steps_land_on_the_axes() {
        let pos = ring_positions(4, (200.0, 200.0), 100.0, 0.0);
        let expected = [
            (200.0, 100.0), // top
            (300.0, 200.0), // right (clockwise)
            (200.0, 300.0), // bottom
            (100.0, 200.0), // left
        ];
        for (i, ((x, y), (ex, ey))) in pos.iter().zip(expected.iter()).enumerate() {
            assert!((x - ex).abs() < 1e-9 && (y - ey).abs() < 1e-9, "i={i}");
        }
    }

    #[test]
    fn concentric_rings_share_the_angle_set() {
        let n = 5;
        let outer = ring_positions(n, (200.0, 200.0), 170.0, 30.0);
        let inner = ring_positions(n, (200.0, 200.0), 145.0, 15.0);
        for i in 0..n {
            // Recover sin/cos from each family and compare.
            let (ox, oy) = outer[i];
            let (ix, iy) = inner[i];
            let outer_dir = ((ox - 185.0) / 170.0, (oy - 185.0) / 170.0);
            let inner_dir = ((ix - 192.5) / 145.0, (iy - 192.5) / 145.0);
            assert!((outer_dir.0 - inner_dir.0).abs() < TOL, "i={i}");
            assert!((outer_dir.1 - inner_dir.1).abs() < TOL, "i={i}");
        }
    }
}
