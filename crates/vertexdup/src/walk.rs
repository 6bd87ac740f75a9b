use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

/// A vertex together with its ordinal in the flattened traversal.
///
/// `position` is diagnostic only: it counts vertices continuously across
/// rings and parts, after ring closures have been dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedCoordinate {
    pub coord: Coord<f64>,
    pub position: usize,
}

/// The logical vertices of a path.
///
/// A path with at least two coordinates whose last coordinate equals its first
/// is a closed ring; the closing coordinate is excluded so that it is never
/// mistaken for a repeated vertex.
#[inline]
pub fn open_vertices(path: &LineString<f64>) -> &[Coord<f64>] {
    match path.0.as_slice() {
        [first, .., last] if first == last => &path.0[..path.0.len() - 1],
        coords => coords,
    }
}

/// Geometries whose logical vertices can be appended to a buffer in traversal order.
pub trait Vertices {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>);

    /// Collect the logical vertices into a new vector.
    fn vertices(&self) -> Vec<Coord<f64>> {
        let mut out = Vec::new();
        self.push_vertices(&mut out);
        out
    }
}

impl Vertices for Point<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        out.push(self.0);
    }
}

impl Vertices for LineString<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        out.extend_from_slice(open_vertices(self));
    }
}

impl Vertices for Polygon<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        self.exterior().push_vertices(out);
        for interior in self.interiors() {
            interior.push_vertices(out);
        }
    }
}

impl Vertices for MultiPoint<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        out.extend(self.0.iter().map(|point| point.0));
    }
}

impl Vertices for MultiLineString<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        self.0.iter().for_each(|line| line.push_vertices(out));
    }
}

impl Vertices for MultiPolygon<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        self.0.iter().for_each(|polygon| polygon.push_vertices(out));
    }
}

impl Vertices for Geometry<f64> {
    fn push_vertices(&self, out: &mut Vec<Coord<f64>>) {
        match self {
            Geometry::Point(point) => point.push_vertices(out),
            Geometry::LineString(line) => line.push_vertices(out),
            Geometry::Polygon(polygon) => polygon.push_vertices(out),
            Geometry::MultiPoint(points) => points.push_vertices(out),
            Geometry::MultiLineString(lines) => lines.push_vertices(out),
            Geometry::MultiPolygon(polygons) => polygons.push_vertices(out),
            // Not part of the simple-feature taxonomy handled here: no vertices.
            Geometry::Line(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_)
            | Geometry::GeometryCollection(_) => {}
        }
    }
}

/// Flatten a geometry into its logical vertices, numbered in traversal order.
pub fn flatten(geometry: &Geometry<f64>) -> Vec<IndexedCoordinate> {
    geometry.vertices().into_iter()
        .enumerate()
        .map(|(position, coord)| IndexedCoordinate { coord, position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string, point, polygon, Rect};

    #[test]
    fn open_vertices_drops_closure() {
        let ring = line_string![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 0.)];
        assert_eq!(open_vertices(&ring).len(), 3);
    }

    #[test]
    fn open_vertices_keeps_open_path() {
        let path = line_string![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)];
        assert_eq!(open_vertices(&path).len(), 3);
    }

    #[test]
    fn open_vertices_single_coordinate_is_not_a_ring() {
        let path = line_string![(x: 3., y: 4.)];
        assert_eq!(open_vertices(&path), &[coord! { x: 3., y: 4. }]);
    }

    #[test]
    fn point_is_position_zero() {
        let flat = flatten(&Geometry::Point(point!(x: 2., y: 3.)));
        assert_eq!(flat, vec![IndexedCoordinate { coord: coord! { x: 2., y: 3. }, position: 0 }]);
    }

    #[test]
    fn polygon_positions_continue_into_interiors() {
        let polygon = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 2., y: 2.), (x: 4., y: 2.), (x: 4., y: 4.)]]
        );
        let flat = flatten(&Geometry::Polygon(polygon));
        assert_eq!(flat.len(), 7);
        assert_eq!(flat[4].coord, coord! { x: 2., y: 2. });
        assert!(flat.iter().enumerate().all(|(i, v)| v.position == i));
    }

    #[test]
    fn unsupported_kinds_have_no_vertices() {
        let rect = Rect::new(coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. });
        assert!(flatten(&Geometry::Rect(rect)).is_empty());
    }
}
