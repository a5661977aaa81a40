use nalgebra::Vector3;
use std::f64::consts::PI;

/// Generates `n` points spread evenly over the unit sphere using the golden
/// spiral.
pub fn golden_spiral_points(n: usize) -> Vec<Vector3<f64>> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let n_f = n as f64;
    (0..n)
        .map(|i| {
            let z = 1.0 - (2.0 * i as f64 + 1.0) / n_f;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let phi = golden_angle * i as f64;
            Vector3::new(r * phi.cos(), r * phi.sin(), z)
        })
        .collect()
}

pub fn sphere_area(radius: f64) -> f64 {
    4.0 * PI * radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_spiral_points_lie_on_unit_sphere() {
        let points = golden_spiral_points(100);
        assert_eq!(points.len(), 100);
        for p in &points {
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn golden_spiral_points_are_balanced() {
        let points = golden_spiral_points(500);
        let centroid: Vector3<f64> = points.iter().sum::<Vector3<f64>>() / points.len() as f64;
        assert!(centroid.norm() < 1e-2);
    }

    #[test]
    fn golden_spiral_handles_zero_and_one_points() {
        assert!(golden_spiral_points(0).is_empty());
        let single = golden_spiral_points(1);
        assert_eq!(single.len(), 1);
        assert!((single[0].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sphere_area_matches_formula() {
        assert!((sphere_area(1.0) - 4.0 * PI).abs() < 1e-12);
        assert_eq!(sphere_area(0.0), 0.0);
    }
}
