use super::neighbors::NeighborList;
use std::f64::consts::TAU;

/// Lee-Richards surface areas for a set of probe-expanded spheres.
///
/// Each sphere is cut into `n_slices` slabs of equal thickness along z. In
/// every slab the circle at the slab midpoint is intersected with the
/// circles of overlapping spheres, and the uncovered arc length times the
/// slab thickness is added to the sphere's area. An isolated sphere sums to
/// exactly `4πR²`.
pub(crate) fn atom_areas(
    centres: &[[f64; 3]],
    radii: &[f64],
    neighbors: &NeighborList,
    n_slices: usize,
) -> Vec<f64> {
    let mut arcs = Vec::new();
    (0..centres.len())
        .map(|i| atom_area(i, centres, radii, neighbors.of(i), n_slices, &mut arcs))
        .collect()
}

fn atom_area(
    i: usize,
    centres: &[[f64; 3]],
    radii: &[f64],
    neighbors: &[usize],
    n_slices: usize,
    arcs: &mut Vec<(f64, f64)>,
) -> f64 {
    let radius = radii[i];
    if radius <= 0.0 {
        return 0.0;
    }
    let [xi, yi, zi] = centres[i];
    let delta = 2.0 * radius / n_slices as f64;
    let mut area = 0.0;

    'slices: for slice in 0..n_slices {
        let z = zi - radius + delta * (slice as f64 + 0.5);
        let Some(ri) = circle_radius(radius, z - zi) else {
            continue;
        };

        arcs.clear();
        for &j in neighbors {
            let [xj, yj, zj] = centres[j];
            let Some(rj) = circle_radius(radii[j], z - zj) else {
                continue;
            };
            let (dx, dy) = (xj - xi, yj - yi);
            let d = dx.hypot(dy);
            if d >= ri + rj {
                continue;
            }
            if d + ri <= rj {
                continue 'slices;
            }
            if d + rj <= ri {
                continue;
            }
            let half_width = ((ri * ri + d * d - rj * rj) / (2.0 * ri * d))
                .clamp(-1.0, 1.0)
                .acos();
            let direction = dy.atan2(dx);
            arcs.push((direction - half_width, 2.0 * half_width));
        }

        area += radius * delta * exposed_angle(arcs);
    }

    area
}

/// Radius of the circle cut from a sphere by a plane at offset `dz` from its centre.
fn circle_radius(radius: f64, dz: f64) -> Option<f64> {
    let r2 = radius * radius - dz * dz;
    (r2 > 0.0).then(|| r2.sqrt())
}

/// Angle of the full circle left uncovered by `arcs`, given as `(start, width)`.
fn exposed_angle(arcs: &[(f64, f64)]) -> f64 {
    if arcs.is_empty() {
        return TAU;
    }

    let mut pieces = Vec::with_capacity(arcs.len() * 2);
    for &(start, width) in arcs {
        if width >= TAU {
            return 0.0;
        }
        let mut start = start.rem_euclid(TAU);
        if start >= TAU {
            start = 0.0;
        }
        let end = start + width;
        if end > TAU {
            pieces.push((start, TAU));
            pieces.push((0.0, end - TAU));
        } else {
            pieces.push((start, end));
        }
    }
    pieces.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut covered = 0.0;
    let (mut lo, mut hi) = pieces[0];
    for &(start, end) in &pieces[1..] {
        if start <= hi {
            hi = hi.max(end);
        } else {
            covered += hi - lo;
            lo = start;
            hi = end;
        }
    }
    covered += hi - lo;

    (TAU - covered).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::params::DEFAULT_LEE_RICHARDS_SLICES;
    use std::f64::consts::PI;

    fn areas(centres: &[[f64; 3]], radii: &[f64], n_slices: usize) -> Vec<f64> {
        let neighbors = NeighborList::build(centres, radii);
        atom_areas(centres, radii, &neighbors, n_slices)
    }

    #[test]
    fn isolated_sphere_has_full_area() {
        let result = areas(&[[1.0, -2.0, 3.0]], &[3.28], 20);
        let expected = 4.0 * PI * 3.28 * 3.28;
        assert!((result[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn isolated_sphere_is_exact_at_any_slice_count() {
        for n in [1, 2, 7, 100] {
            let result = areas(&[[0.0, 0.0, 0.0]], &[2.0], n);
            assert!((result[0] - 16.0 * PI).abs() < 1e-9, "n = {n}");
        }
    }

    #[test]
    fn zero_radius_sphere_has_no_area() {
        let result = areas(&[[0.0, 0.0, 0.0]], &[0.0], 20);
        assert_eq!(result, vec![0.0]);
    }

    #[test]
    fn two_overlapping_spheres_lose_a_cap_each() {
        let (radius, d) = (2.0, 3.0);
        let result = areas(&[[0.0, 0.0, 0.0], [d, 0.0, 0.0]], &[radius, radius], 200);
        let cap_height = radius - d / 2.0;
        let expected = 4.0 * PI * radius * radius - 2.0 * PI * radius * cap_height;
        for area in &result {
            assert!((area - expected).abs() / expected < 1e-2, "{area} vs {expected}");
        }
        assert!((result[0] - result[1]).abs() < 1e-9);
    }

    #[test]
    fn overlap_along_slicing_axis_matches_cap_formula() {
        let (radius, d) = (2.0, 3.0);
        let result = areas(&[[0.0, 0.0, 0.0], [0.0, 0.0, d]], &[radius, radius], 400);
        let expected = 4.0 * PI * radius * radius - 2.0 * PI * radius * (radius - d / 2.0);
        for area in &result {
            assert!((area - expected).abs() / expected < 1e-2, "{area} vs {expected}");
        }
    }

    #[test]
    fn default_slices_match_cap_formula() {
        let (radius, d) = (2.0, 3.0);
        let expected = 4.0 * PI * radius * radius - 2.0 * PI * radius * (radius - d / 2.0);

        let side_by_side = areas(
            &[[0.0, 0.0, 0.0], [d, 0.0, 0.0]],
            &[radius, radius],
            DEFAULT_LEE_RICHARDS_SLICES,
        );
        for area in &side_by_side {
            assert!((area - expected).abs() / expected < 1e-2, "{area} vs {expected}");
        }

        // One slab straddles the cap boundary when the overlap lies along z.
        let stacked = areas(
            &[[0.0, 0.0, 0.0], [0.0, 0.0, d]],
            &[radius, radius],
            DEFAULT_LEE_RICHARDS_SLICES,
        );
        for area in &stacked {
            assert!((area - expected).abs() / expected < 5e-2, "{area} vs {expected}");
        }
    }

    #[test]
    fn alanine_total_at_default_slices_is_close_to_converged_value() {
        // ProtOr radii of N, CA, C, O, CB plus a 1.4 Å probe.
        let centres = [
            [-0.966, 0.493, 1.500],
            [0.257, 0.418, 0.692],
            [-0.094, 0.017, -0.716],
            [-1.056, -0.682, -0.923],
            [1.204, -0.620, 1.296],
        ];
        let radii = [1.64, 1.88, 1.61, 1.42, 1.88].map(|r| r + 1.4);
        let converged: f64 = areas(&centres, &radii, 2000).iter().sum();
        let default: f64 = areas(&centres, &radii, DEFAULT_LEE_RICHARDS_SLICES)
            .iter()
            .sum();

        assert!((converged - 212.9).abs() < 0.5, "converged total {converged}");
        assert!((default - converged).abs() / converged < 5e-3, "{default} vs {converged}");
    }

    #[test]
    fn enclosed_sphere_is_fully_buried() {
        let result = areas(&[[0.0, 0.0, 0.0], [0.5, 0.0, 0.0]], &[1.0, 3.0], 20);
        assert!(result[0].abs() < 1e-9);
        assert!(result[1] > 0.0);
    }

    #[test]
    fn sphere_surrounded_on_all_axes_is_buried() {
        let mut centres = vec![[0.0, 0.0, 0.0]];
        for axis in 0..3 {
            for sign in [-1.0, 1.0] {
                let mut c = [0.0; 3];
                c[axis] = sign;
                centres.push(c);
            }
        }
        let radii = vec![1.5; centres.len()];
        let result = areas(&centres, &radii, 50);
        assert!(result[0].abs() < 1e-6, "buried area {}", result[0]);
    }

    #[test]
    fn exposed_angle_merges_wrapping_arcs() {
        assert_eq!(exposed_angle(&[]), TAU);
        let half = exposed_angle(&[(-PI / 2.0, PI)]);
        assert!((half - PI).abs() < 1e-12);
        let overlapping = exposed_angle(&[(0.0, PI), (PI / 2.0, PI)]);
        assert!((overlapping - PI / 2.0).abs() < 1e-12);
        assert_eq!(exposed_angle(&[(1.0, TAU)]), 0.0);
    }
}
