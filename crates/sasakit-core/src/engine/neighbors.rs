use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Rotation3};
use std::collections::HashMap;

// Euler angles of a generic orientation. Planar inputs (every atom at x = 0,
// say) would otherwise put more points than a bucket holds on one split value.
const TREE_ORIENTATION: (f64, f64, f64) = (0.5773, 1.1071, 0.3927);

// Rotated distances differ from the true ones by rounding only; candidates
// are re-checked exactly.
const QUERY_SLACK: f64 = 1e-6;

/// Overlapping spheres for every sphere of a set.
///
/// Two spheres are neighbors when the distance between their centres is
/// strictly less than the sum of their radii. Lists are sorted by index and
/// never contain the sphere itself.
#[derive(Debug, Clone, Default)]
pub(crate) struct NeighborList {
    lists: Vec<Vec<usize>>,
}

impl NeighborList {
    pub(crate) fn build(centres: &[[f64; 3]], radii: &[f64]) -> Self {
        debug_assert_eq!(centres.len(), radii.len());
        if centres.is_empty() {
            return Self::default();
        }

        // Coincident centres share one tree entry.
        let mut sites: Vec<Vec<usize>> = Vec::new();
        let mut site_of: HashMap<[u64; 3], usize> = HashMap::new();
        for (i, centre) in centres.iter().enumerate() {
            let key = centre.map(|c| (c + 0.0).to_bits());
            let site = *site_of.entry(key).or_insert_with(|| {
                sites.push(Vec::new());
                sites.len() - 1
            });
            sites[site].push(i);
        }

        let (roll, pitch, yaw) = TREE_ORIENTATION;
        let rotation = Rotation3::from_euler_angles(roll, pitch, yaw);
        let rotate = |c: &[f64; 3]| -> [f64; 3] {
            let p = rotation * Point3::from(*c);
            [p.x, p.y, p.z]
        };
        let kdtree: KdTree<f64, 3> = sites
            .iter()
            .enumerate()
            .map(|(site, members)| (rotate(&centres[members[0]]), site as u64))
            .collect();

        let max_radius = radii.iter().copied().fold(0.0_f64, f64::max);
        let lists = centres
            .iter()
            .zip(radii)
            .enumerate()
            .map(|(i, (centre, &radius))| {
                let cutoff = radius + max_radius + QUERY_SLACK;
                let mut neighbors: Vec<usize> = kdtree
                    .within_unsorted::<SquaredEuclidean>(&rotate(centre), cutoff * cutoff)
                    .into_iter()
                    .flat_map(|nn| sites[nn.item as usize].iter().copied())
                    .filter(|&j| j != i && overlaps(centre, radius, &centres[j], radii[j]))
                    .collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        Self { lists }
    }

    pub(crate) fn of(&self, index: usize) -> &[usize] {
        self.lists.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn overlaps(a: &[f64; 3], ra: f64, b: &[f64; 3], rb: f64) -> bool {
    let d2: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    let reach = ra + rb;
    d2 < reach * reach
}
