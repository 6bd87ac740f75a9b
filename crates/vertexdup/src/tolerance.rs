use std::fmt;

use geo::{Coord, Geometry};
use rstar::{primitives::GeomWithData, RTree, AABB};

use crate::error::ToleranceError;
use crate::set::DuplicateSet;
use crate::walk::Vertices;

/// How the distance between two vertices is compared against the tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Straight-line distance: `hypot(dx, dy) <= t`.
    #[default]
    Euclidean,
    /// Chebyshev distance: `|dx| <= t` and `|dy| <= t`.
    PerAxis,
}

impl Metric {
    #[inline]
    fn within(self, a: Coord<f64>, b: Coord<f64>, tolerance: f64) -> bool {
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        match self {
            Metric::Euclidean => dx.hypot(dy) <= tolerance,
            Metric::PerAxis => dx.abs() <= tolerance && dy.abs() <= tolerance,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::PerAxis => write!(f, "per-axis"),
        }
    }
}

/// A vertex in the R-tree, tagged with its traversal position.
type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Find every vertex of `geometry` that lies within `tolerance` (Euclidean) of
/// another vertex. A tolerance of `0.0` is equivalent to exact matching.
pub fn find_tolerance_duplicates(geometry: &Geometry<f64>, tolerance: f64) -> Result<DuplicateSet, ToleranceError> {
    find_tolerance_duplicates_with(geometry, tolerance, Metric::Euclidean)
}

/// Find every vertex of `geometry` that lies within `tolerance` of another
/// vertex under `metric`.
///
/// Candidates are gathered from an R-tree with a square window of half-width
/// `tolerance` around each vertex, then confirmed with `metric`. Each vertex
/// is queried once; every vertex with a confirmed neighbour is reported along
/// with that neighbour. Neighbour relations are not clustered.
///
/// Coordinates with a NaN or infinite component are never reported, even when
/// another vertex is bitwise equal to them.
pub fn find_tolerance_duplicates_with(
    geometry: &Geometry<f64>,
    tolerance: f64,
    metric: Metric,
) -> Result<DuplicateSet, ToleranceError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ToleranceError::Invalid(tolerance));
    }

    let vertices = geometry.vertices();
    let mut duplicates = DuplicateSet::new();
    if vertices.is_empty() { return Ok(duplicates) }

    let rtree: RTree<IndexedPoint> = RTree::bulk_load(
        vertices.iter().enumerate()
            .filter(|(_, c)| c.x.is_finite() && c.y.is_finite())
            .map(|(i, c)| IndexedPoint::new([c.x, c.y], i))
            .collect()
    );

    let mut neighbors = Vec::new();
    for (i, &coord) in vertices.iter().enumerate() {
        if !(coord.x.is_finite() && coord.y.is_finite()) { continue }

        let window = AABB::from_corners(
            [coord.x - tolerance, coord.y - tolerance],
            [coord.x + tolerance, coord.y + tolerance],
        );

        neighbors.clear();
        neighbors.extend(rtree.locate_in_envelope_intersecting(&window)
            .map(|point| point.data)
            .filter(|&j| j != i && metric.within(coord, vertices[j], tolerance)));
        if neighbors.is_empty() { continue }

        // R-tree order is arbitrary; keep insertion order tied to the traversal.
        neighbors.sort_unstable();
        duplicates.insert(coord);
        duplicates.extend(neighbors.iter().map(|&j| vertices[j]));
    }

    Ok(duplicates)
}
