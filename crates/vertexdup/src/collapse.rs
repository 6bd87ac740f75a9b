use ahash::AHashSet;
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

use crate::error::CollapseError;
use crate::set::CoordKey;
use crate::walk::open_vertices;

/// Remove runs of identical consecutive coordinates, keeping the first of each run.
///
/// Non-adjacent repeats are left alone.
pub fn collapse_consecutive(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(coords.len());
    for &coord in coords {
        if out.last() != Some(&coord) { out.push(coord) }
    }
    out
}

/// Geometries that can have consecutive repeated vertices removed.
///
/// The input is never modified; a new value is returned. Collapsing fails
/// rather than emitting a line with fewer than 2 coordinates or a ring with
/// fewer than 3 distinct vertices.
pub trait CollapseRepeated: Sized {
    fn collapse(&self) -> Result<Self, CollapseError>;
}

impl CollapseRepeated for LineString<f64> {
    fn collapse(&self) -> Result<Self, CollapseError> {
        if self.0.is_empty() { return Ok(self.clone()) }

        let coords = collapse_consecutive(&self.0);
        if coords.len() < 2 {
            return Err(CollapseError::DegenerateLineString { part: 0, vertices: coords.len() })
        }
        Ok(LineString(coords))
    }
}

/// Collapse one polygon ring and close it again.
fn collapse_ring(ring: &LineString<f64>, index: usize) -> Result<LineString<f64>, CollapseError> {
    if ring.0.is_empty() { return Ok(ring.clone()) }

    let mut coords = collapse_consecutive(open_vertices(ring));

    // A run wrapping around the closure point shows up as trailing copies of the start.
    while coords.len() > 1 && coords.last() == coords.first() {
        coords.pop();
    }

    let distinct = coords.iter().map(|&c| CoordKey::new(c)).collect::<AHashSet<_>>().len();
    if distinct < 3 {
        return Err(CollapseError::DegenerateRing { part: 0, ring: index, vertices: distinct })
    }

    coords.push(coords[0]);
    Ok(LineString(coords))
}

impl CollapseRepeated for Polygon<f64> {
    fn collapse(&self) -> Result<Self, CollapseError> {
        let exterior = collapse_ring(self.exterior(), 0)?;
        let interiors = self.interiors().iter().enumerate()
            .map(|(i, ring)| collapse_ring(ring, i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(exterior, interiors))
    }
}

impl CollapseRepeated for MultiLineString<f64> {
    fn collapse(&self) -> Result<Self, CollapseError> {
        self.0.iter().enumerate()
            .map(|(i, line)| line.collapse().map_err(|e| e.in_part(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(MultiLineString)
    }
}

impl CollapseRepeated for MultiPolygon<f64> {
    fn collapse(&self) -> Result<Self, CollapseError> {
        self.0.iter().enumerate()
            .map(|(i, polygon)| polygon.collapse().map_err(|e| e.in_part(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(MultiPolygon)
    }
}

impl CollapseRepeated for Geometry<f64> {
    fn collapse(&self) -> Result<Self, CollapseError> {
        Ok(match self {
            Geometry::LineString(line) => Geometry::LineString(line.collapse()?),
            Geometry::Polygon(polygon) => Geometry::Polygon(polygon.collapse()?),
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(lines.collapse()?),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(polygons.collapse()?),
            // Points have no adjacency; unsupported kinds pass through untouched.
            Geometry::Point(_)
            | Geometry::MultiPoint(_)
            | Geometry::Line(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_)
            | Geometry::GeometryCollection(_) => self.clone(),
        })
    }
}

/// Remove consecutive repeated vertices from every line and ring of `geometry`.
pub fn collapse(geometry: &Geometry<f64>) -> Result<Geometry<f64>, CollapseError> {
    geometry.collapse()
}
