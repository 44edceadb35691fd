//! Spatial indexing for nearest-neighbor queries in reciprocal space.
//!
//! Provides a 3-D k-d tree used to find, for every spot in a group, the
//! squared distance to its nearest distinct neighbor. Queries are exact.

/// A 3-D k-d tree over reciprocal-space positions.
///
/// Built once per spot group with a median-split strategy, then queried
/// once per point at k = 1.
#[derive(Debug)]
pub struct KdTree3 {
    nodes: Vec<KdNode>,
    points: Vec<[f64; 3]>,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into the points array.
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    /// Split dimension (0, 1, or 2).
    split_dim: usize,
}

impl KdTree3 {
    /// Builds a k-d tree from a point set. Returns `None` if empty.
    pub fn build(points: &[[f64; 3]]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let points_vec = points.to_vec();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());

        Self::build_recursive(&points_vec, &mut indices, 0, &mut nodes);

        Some(Self {
            nodes,
            points: points_vec,
        })
    }

    fn build_recursive(
        points: &[[f64; 3]],
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let split_dim = depth % 3;
        indices.sort_by(|&a, &b| points[a][split_dim].total_cmp(&points[b][split_dim]));

        let median = indices.len() / 2;
        let point_idx = indices[median];

        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx,
            left: None,
            right: None,
            split_dim,
        });

        let (left_indices, right_part) = indices.split_at_mut(median);
        let right_indices = &mut right_part[1..]; // skip the median

        let left = Self::build_recursive(points, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, right_indices, depth + 1, nodes);

        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    /// Finds the nearest neighbor to `query`, skipping the point stored at
    /// index `exclude` so a point never matches itself.
    ///
    /// Returns `(point index, squared distance)`, or `None` when the tree
    /// holds no other point.
    pub fn nearest_excluding(&self, query: [f64; 3], exclude: usize) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        self.nearest_recursive(0, query, exclude, &mut best);
        best
    }

    fn nearest_recursive(
        &self,
        node_idx: usize,
        query: [f64; 3],
        exclude: usize,
        best: &mut Option<(usize, f64)>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];

        if node.point_idx != exclude {
            let dist_sq = distance_squared(query, point);
            if best.map_or(true, |(_, d)| dist_sq < d) {
                *best = Some((node.point_idx, dist_sq));
            }
        }

        let diff = query[node.split_dim] - point[node.split_dim];
        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(first_idx) = first {
            self.nearest_recursive(first_idx, query, exclude, best);
        }

        // The far subtree can only hold a closer point if the splitting
        // plane is nearer than the current best.
        let diff_sq = diff * diff;
        if let Some(second_idx) = second {
            if best.map_or(true, |(_, d)| diff_sq < d) {
                self.nearest_recursive(second_idx, query, exclude, best);
            }
        }
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Squared Euclidean distance between two 3-D points.
#[inline]
fn distance_squared(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Computes, for each point, the squared distance to its nearest distinct
/// neighbor in the same set.
///
/// Point sets with fewer than two members yield an empty result. Exact
/// duplicates (squared distance zero) are dropped rather than emitted, so
/// every returned value is strictly positive.
pub fn nearest_neighbor_distances_sq(points: &[[f64; 3]]) -> Vec<f64> {
    if points.len() < 2 {
        return Vec::new();
    }

    let Some(tree) = KdTree3::build(points) else {
        return Vec::new();
    };

    points
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| tree.nearest_excluding(p, i))
        .map(|(_, dist_sq)| dist_sq)
        .filter(|&dist_sq| dist_sq > 0.0)
        .collect()
}
