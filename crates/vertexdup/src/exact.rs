use ahash::AHashSet;
use geo::Geometry;

use crate::set::{CoordKey, DuplicateSet};
use crate::walk::Vertices;

/// Find every coordinate that occurs more than once among the logical
/// vertices of `geometry`, comparing (x, y) exactly.
///
/// Ring closures are not counted (see [`open_vertices`](crate::open_vertices)).
/// Coordinates with a NaN or infinite component are never reported, even when
/// they repeat bit for bit.
pub fn find_exact_duplicates(geometry: &Geometry<f64>) -> DuplicateSet {
    let vertices = geometry.vertices();
    let mut seen = AHashSet::with_capacity(vertices.len());
    let mut duplicates = DuplicateSet::new();

    for coord in vertices.into_iter().filter(|c| c.x.is_finite() && c.y.is_finite()) {
        if !seen.insert(CoordKey::new(coord)) {
            duplicates.insert(coord);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string, polygon, MultiPoint};

    #[test]
    fn repeated_vertex_is_reported_once() {
        let line = line_string![(x: 0., y: 0.), (x: 1., y: 1.), (x: 0., y: 0.), (x: 2., y: 2.), (x: 0., y: 0.)];
        let duplicates = find_exact_duplicates(&Geometry::LineString(line));
        assert_eq!(duplicates.into_vec(), vec![coord! { x: 0., y: 0. }]);
    }

    #[test]
    fn ring_closure_is_not_a_duplicate() {
        let square = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.), (x: 0., y: 0.)];
        assert!(find_exact_duplicates(&Geometry::Polygon(square)).is_empty());
    }

    #[test]
    fn nan_coordinates_are_ignored() {
        let points = MultiPoint::from(vec![(f64::NAN, 0.), (f64::NAN, 0.)]);
        assert!(find_exact_duplicates(&Geometry::MultiPoint(points)).is_empty());
    }

    #[test]
    fn infinite_coordinates_are_ignored() {
        let points = MultiPoint::from(vec![(f64::INFINITY, 0.), (f64::INFINITY, 0.), (1., 1.), (1., 1.)]);
        let duplicates = find_exact_duplicates(&Geometry::MultiPoint(points));
        assert_eq!(duplicates.into_vec(), vec![coord! { x: 1., y: 1. }]);
    }
}
