use super::neighbors::NeighborList;
use crate::core::utils::geometry::{golden_spiral_points, sphere_area};
use nalgebra::Vector3;

/// Shrake-Rupley surface areas for a set of probe-expanded spheres.
///
/// `n_points` test points are spread over every sphere; the area of a sphere
/// is its full area scaled by the fraction of points outside every
/// overlapping sphere.
pub(crate) fn atom_areas(
    centres: &[[f64; 3]],
    radii: &[f64],
    neighbors: &NeighborList,
    n_points: usize,
) -> Vec<f64> {
    let points = golden_spiral_points(n_points);
    let centres: Vec<Vector3<f64>> = centres.iter().copied().map(Vector3::from).collect();

    (0..centres.len())
        .map(|i| {
            let radius = radii[i];
            if radius <= 0.0 {
                return 0.0;
            }
            let exposed = points
                .iter()
                .map(|unit| centres[i] + unit * radius)
                .filter(|point| {
                    neighbors.of(i).iter().all(|&j| {
                        (point - centres[j]).norm_squared() >= radii[j] * radii[j]
                    })
                })
                .count();
            sphere_area(radius) * exposed as f64 / n_points as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn areas(centres: &[[f64; 3]], radii: &[f64], n_points: usize) -> Vec<f64> {
        let neighbors = NeighborList::build(centres, radii);
        atom_areas(centres, radii, &neighbors, n_points)
    }

    #[test]
    fn isolated_sphere_has_full_area() {
        let result = areas(&[[5.0, 5.0, 5.0]], &[3.0], 100);
        assert!((result[0] - 36.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn two_overlapping_spheres_approach_cap_formula() {
        let (radius, d) = (2.0, 3.0);
        let result = areas(&[[0.0, 0.0, 0.0], [d, 0.0, 0.0]], &[radius, radius], 2000);
        let expected = 4.0 * PI * radius * radius - 2.0 * PI * radius * (radius - d / 2.0);
        for area in &result {
            assert!((area - expected).abs() / expected < 2e-2, "{area} vs {expected}");
        }
    }

    #[test]
    fn enclosed_sphere_has_no_exposed_points() {
        let result = areas(&[[0.0, 0.0, 0.0], [0.5, 0.0, 0.0]], &[1.0, 3.0], 100);
        assert_eq!(result[0], 0.0);
        assert!(result[1] > 0.0);
    }

    #[test]
    fn zero_radius_sphere_has_no_area() {
        assert_eq!(areas(&[[0.0, 0.0, 0.0]], &[0.0], 100), vec![0.0]);
    }
}
