use geo::{Coord, Geometry};
use serde_json::{Map, Value};

/// Extra ordinates (z, m, ...) of every position, grouped by path in traversal order.
///
/// A path is one point, one line string or one polygon ring. Paths are listed
/// in the same order as [`paths`] visits them.
pub(crate) type Ordinates = Vec<Vec<Vec<f64>>>;

/// One GeoJSON feature: identity, properties, and its parsed geometry.
///
/// A geometry that failed to parse is kept as an error message so that
/// batch processing can report it and move on.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Position of the feature in its source collection.
    pub index: usize,
    pub id: Option<Value>,
    pub properties: Map<String, Value>,
    pub shape: Result<Shape, String>,
}

impl Feature {
    /// The same feature with a different shape.
    pub(crate) fn with_shape(&self, shape: Shape) -> Self {
        Self {
            index: self.index,
            id: self.id.clone(),
            properties: self.properties.clone(),
            shape: Ok(shape),
        }
    }
}

/// A 2D geometry plus any higher ordinates the source positions carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: Geometry<f64>,
    pub(crate) ordinates: Option<Ordinates>,
}

impl Shape {
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self { geometry, ordinates: None }
    }

    pub(crate) fn with_ordinates(geometry: Geometry<f64>, ordinates: Ordinates) -> Self {
        let has_extra = ordinates.iter().flatten().any(|extra| !extra.is_empty());
        Self { geometry, ordinates: has_extra.then_some(ordinates) }
    }

    /// Returns `true` if any position carries more than two ordinates.
    pub fn has_extra_ordinates(&self) -> bool { self.ordinates.is_some() }

    /// Replace the geometry with `cleaned`, a vertex subsequence of the current
    /// one (same paths, same order), carrying the extra ordinates of each
    /// surviving vertex across unchanged.
    pub(crate) fn replace_geometry(&self, cleaned: Geometry<f64>) -> Shape {
        let Some(ordinates) = &self.ordinates else { return Shape::new(cleaned) };

        let realigned = paths(&self.geometry).into_iter()
            .zip(ordinates)
            .zip(paths(&cleaned))
            .map(|((source, extra), kept)| realign(source, extra, kept))
            .collect();

        Shape { geometry: cleaned, ordinates: Some(realigned) }
    }
}

/// Match each coordinate of `kept` to the first unused equal coordinate of `source`.
fn realign(source: &[Coord<f64>], extra: &[Vec<f64>], kept: &[Coord<f64>]) -> Vec<Vec<f64>> {
    let mut cursor = 0;
    kept.iter()
        .map(|coord| {
            while cursor < source.len() && source[cursor] != *coord { cursor += 1 }
            let ordinates = extra.get(cursor).cloned().unwrap_or_default();
            cursor += 1;
            ordinates
        })
        .collect()
}

/// Every coordinate path of `geometry`: points, line strings, then polygon
/// rings (exterior first), recursing into collections.
pub(crate) fn paths(geometry: &Geometry<f64>) -> Vec<&[Coord<f64>]> {
    fn visit<'a>(geometry: &'a Geometry<f64>, out: &mut Vec<&'a [Coord<f64>]>) {
        match geometry {
            Geometry::Point(point) => out.push(std::slice::from_ref(&point.0)),
            Geometry::MultiPoint(points) => out.extend(points.0.iter().map(|p| std::slice::from_ref(&p.0))),
            Geometry::LineString(line) => out.push(&line.0),
            Geometry::MultiLineString(lines) => out.extend(lines.0.iter().map(|l| l.0.as_slice())),
            Geometry::Polygon(polygon) => {
                out.push(&polygon.exterior().0);
                out.extend(polygon.interiors().iter().map(|r| r.0.as_slice()));
            }
            Geometry::MultiPolygon(polygons) => {
                for polygon in &polygons.0 {
                    out.push(&polygon.exterior().0);
                    out.extend(polygon.interiors().iter().map(|r| r.0.as_slice()));
                }
            }
            Geometry::GeometryCollection(collection) => {
                collection.0.iter().for_each(|member| visit(member, out));
            }
            Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {}
        }
    }

    let mut out = Vec::new();
    visit(geometry, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, LineString, Polygon};

    #[test]
    fn realign_follows_first_of_each_run() {
        let source = LineString::from(vec![(0., 0.), (0., 0.), (1., 0.), (1., 0.), (2., 0.)]);
        let extra = vec![vec![10.], vec![11.], vec![12.], vec![13.], vec![14.]];
        let kept = LineString::from(vec![(0., 0.), (1., 0.), (2., 0.)]);
        assert_eq!(realign(&source.0, &extra, &kept.0), vec![vec![10.], vec![12.], vec![14.]]);
    }

    #[test]
    fn realign_keeps_the_ring_closure() {
        let source = LineString::from(vec![(0., 0.), (0., 0.), (1., 0.), (1., 1.), (0., 0.)]);
        let extra = vec![vec![1.], vec![2.], vec![3.], vec![4.], vec![5.]];
        let kept = LineString::from(vec![(0., 0.), (1., 0.), (1., 1.), (0., 0.)]);
        assert_eq!(realign(&source.0, &extra, &kept.0), vec![vec![1.], vec![3.], vec![4.], vec![5.]]);
    }

    #[test]
    fn two_dimensional_shapes_carry_no_ordinates() {
        let line = Geometry::LineString(line_string![(x: 0., y: 0.), (x: 1., y: 1.)]);
        let shape = Shape::with_ordinates(line, vec![vec![vec![], vec![]]]);
        assert!(!shape.has_extra_ordinates());
    }

    #[test]
    fn polygon_paths_list_exterior_before_holes() {
        let polygon = Polygon::new(
            LineString::from(vec![(0., 0.), (9., 0.), (9., 9.), (0., 0.)]),
            vec![LineString::from(vec![(1., 1.), (2., 1.), (2., 2.), (1., 1.)])],
        );
        let geometry = Geometry::Polygon(polygon);
        let paths = paths(&geometry);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1][0], Coord { x: 1., y: 1. });
    }
}
